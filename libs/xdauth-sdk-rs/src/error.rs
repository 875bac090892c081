use thiserror::Error;
use xdauth_token::{ErrorCode, TokenError};

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No token in the request, or the token is unusable before verification
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token verification failed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// The token was minted for a different domain
    #[error("Audience mismatch: expected {expected}, got {actual}")]
    AudienceMismatch { expected: String, actual: String },

    /// Redirect URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Maps the error onto the token core's error codes for responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Token(e) => e.code(),
            Self::InvalidToken(_) => ErrorCode::MalformedToken,
            Self::AudienceMismatch { .. } => ErrorCode::AudienceMismatch,
            Self::InvalidUrl(_) | Self::Config(_) => ErrorCode::InternalError,
        }
    }
}
