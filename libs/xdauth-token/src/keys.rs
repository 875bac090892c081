use secrecy::{ExposeSecret, SecretSlice};

use crate::{TokenError, TokenResult};

/// Source of the deployment-wide signing key.
///
/// Called once per generate/validate; implementations own caching and
/// rotation, the token core keeps nothing.
pub trait KeyProvider: Send + Sync {
    fn signing_key(&self) -> TokenResult<SecretSlice<u8>>;
}

/// An in-memory key, typically resolved once by the application at startup.
pub struct StaticKey(SecretSlice<u8>);

impl StaticKey {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(SecretSlice::from(key.into()))
    }
}

impl KeyProvider for StaticKey {
    fn signing_key(&self) -> TokenResult<SecretSlice<u8>> {
        let key = self.0.expose_secret();
        if key.is_empty() {
            return Err(TokenError::KeyUnavailable);
        }
        Ok(SecretSlice::from(key.to_vec()))
    }
}

/// Reads the key from an environment variable on every call.
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    pub const DEFAULT_VAR: &'static str = "XDAUTH_SECRET_KEY";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKey {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl KeyProvider for EnvKey {
    fn signing_key(&self) -> TokenResult<SecretSlice<u8>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(SecretSlice::from(value.into_bytes())),
            _ => {
                tracing::error!(var = %self.var, "Signing key environment variable is not set");
                Err(TokenError::KeyUnavailable)
            }
        }
    }
}
