//! Base64url and JSON encoding of token segments.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::{ClaimSet, TokenError, TokenResult};

/// Token header. Field order is kept as `alg`, `typ` for generic JWT tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub alg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn new(alg: &str) -> Self {
        Self {
            alg: Some(alg.to_string()),
            typ: Some("JWT".to_string()),
        }
    }
}

pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes an unpadded base64url segment. Anything outside `[A-Za-z0-9_-]`
/// is rejected, `=` included, so each byte string has exactly one encoding.
pub fn decode_segment(segment: &str) -> TokenResult<Vec<u8>> {
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(TokenError::Decode(format!("unexpected character {:?}", bad)));
    }

    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Decode(e.to_string()))
}

pub fn encode_json<T: Serialize>(value: &T) -> TokenResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| TokenError::Serialization(e.to_string()))
}

/// Decodes a payload into a claim set. Valid JSON that is not an object is
/// still a malformed payload, as are integers outside the `i64` range.
pub fn decode_json(bytes: &[u8]) -> TokenResult<ClaimSet> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| TokenError::MalformedPayload(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(TokenError::MalformedPayload(
            "payload is not a JSON object".into(),
        ));
    };
    object.values().try_for_each(check_integer_range)?;

    serde_json::from_value(value).map_err(|e| TokenError::MalformedPayload(e.to_string()))
}

// Integers beyond i64 would otherwise come back as lossy floats.
fn check_integer_range(value: &serde_json::Value) -> TokenResult<()> {
    match value {
        serde_json::Value::Number(n) if n.is_u64() && !n.is_i64() => Err(
            TokenError::MalformedPayload(format!("integer {n} is out of range")),
        ),
        serde_json::Value::Array(values) => values.iter().try_for_each(check_integer_range),
        _ => Ok(()),
    }
}

pub fn decode_header(segment: &str) -> TokenResult<Header> {
    let bytes = decode_segment(segment)
        .map_err(|e| TokenError::MalformedToken(format!("header: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("header: {}", e)))
}
