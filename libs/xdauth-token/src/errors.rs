use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for mapping token failures onto application responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    KeyUnavailable,
    Disabled,
    MalformedToken,
    UnsupportedAlgorithm,
    SignatureMismatch,
    MalformedPayload,
    TokenExpired,
    DecodeError,
    /// Reported by relying parties when `aud` does not name them
    AudienceMismatch,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::KeyUnavailable => "KEY_UNAVAILABLE",
            Self::Disabled => "DISABLED",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::UnsupportedAlgorithm => "UNSUPPORTED_ALGORITHM",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::MalformedPayload => "MALFORMED_PAYLOAD",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::DecodeError => "DECODE_ERROR",
            Self::AudienceMismatch => "AUDIENCE_MISMATCH",
            Self::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Token generation and validation errors.
///
/// None of these are retryable: a rejected token is regenerated, never retried.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing key is not available")]
    KeyUnavailable,

    #[error("Cross-domain authentication is disabled")]
    Disabled,

    #[error("Invalid token format: {0}")]
    MalformedToken(String),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature verification failed")]
    SignatureMismatch,

    #[error("Invalid token payload: {0}")]
    MalformedPayload(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid base64url segment: {0}")]
    Decode(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl TokenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::KeyUnavailable => ErrorCode::KeyUnavailable,
            Self::Disabled => ErrorCode::Disabled,
            Self::MalformedToken(_) => ErrorCode::MalformedToken,
            Self::UnsupportedAlgorithm(_) => ErrorCode::UnsupportedAlgorithm,
            Self::SignatureMismatch => ErrorCode::SignatureMismatch,
            Self::MalformedPayload(_) => ErrorCode::MalformedPayload,
            Self::TokenExpired => ErrorCode::TokenExpired,
            Self::Decode(_) => ErrorCode::DecodeError,
            Self::Serialization(_) => ErrorCode::InternalError,
        }
    }

    /// Returns true for failures that indicate tampering or a wrong key,
    /// as opposed to routine conditions like expiry.
    pub fn is_security_relevant(&self) -> bool {
        matches!(self, Self::SignatureMismatch | Self::UnsupportedAlgorithm(_))
    }
}

pub type TokenResult<T> = Result<T, TokenError>;
