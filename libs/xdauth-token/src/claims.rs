use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SUBJECT: &str = "sub";
pub const ISSUED_AT: &str = "iat";
pub const EXPIRES_AT: &str = "exp";
pub const ISSUER: &str = "iss";
pub const AUDIENCE: &str = "aud";
pub const TOKEN_ID: &str = "jti";
pub const EMAIL: &str = "email";
pub const NAME: &str = "name";

/// A single claim value.
///
/// Serialized untagged so the payload stays plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ClaimValue>),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// False if a NaN or infinite float appears anywhere in the value. JSON
    /// has no encoding for those.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(n) => n.is_finite(),
            Self::Array(values) => values.iter().all(Self::is_finite),
            _ => true,
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Intended recipient(s) of a token.
///
/// Whether a deployment uses a single string or an array is policy, so both
/// shapes are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Builds an audience from a comma-separated list. One entry stays a string.
    pub fn parse_list(raw: &str) -> Option<Self> {
        let mut entries: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match entries.len() {
            0 => None,
            1 => entries.pop().map(Self::Single),
            _ => Some(Self::Multiple(entries)),
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        match self {
            Self::Single(aud) => aud == domain,
            Self::Multiple(auds) => auds.iter().any(|aud| aud == domain),
        }
    }
}

impl From<Audience> for ClaimValue {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Single(aud) => ClaimValue::String(aud),
            Audience::Multiple(auds) => auds.into(),
        }
    }
}

/// The full set of claims carried by one token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, ClaimValue>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<ClaimValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ClaimValue::as_i64)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClaimValue)> {
        self.0.iter()
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str(SUBJECT)
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.get_i64(ISSUED_AT)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.get_i64(EXPIRES_AT)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.get_str(ISSUER)
    }

    pub fn token_id(&self) -> Option<&str> {
        self.get_str(TOKEN_ID)
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str(EMAIL)
    }

    /// Reads `aud` in either shape. Non-string array entries are skipped.
    pub fn audience(&self) -> Option<Audience> {
        match self.get(AUDIENCE)? {
            ClaimValue::String(aud) => Some(Audience::Single(aud.clone())),
            ClaimValue::Array(values) => Some(Audience::Multiple(
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.insert(SUBJECT, subject.into());
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.insert(ISSUER, issuer.into());
    }

    pub fn set_audience(&mut self, audience: Audience) {
        self.insert(AUDIENCE, audience);
    }

    pub fn set_token_id(&mut self, jti: impl Into<String>) {
        self.insert(TOKEN_ID, jti.into());
    }

    /// Overwrites the timing claims. Only token generation calls this.
    pub(crate) fn stamp_times(&mut self, issued_at: i64, expires_at: i64) {
        self.insert(ISSUED_AT, issued_at);
        self.insert(EXPIRES_AT, expires_at);
    }

    pub fn into_inner(self) -> BTreeMap<String, ClaimValue> {
        self.0
    }
}

impl From<BTreeMap<String, ClaimValue>> for ClaimSet {
    fn from(map: BTreeMap<String, ClaimValue>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The authenticated customer carried across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Customer ID, becomes `sub`
    pub id: String,

    pub email: String,

    /// Display name, omitted from the token when absent
    pub name: Option<String>,
}
