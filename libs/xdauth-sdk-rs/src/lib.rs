//! Rust SDK for domains accepting xdauth cross-domain tokens.
//!
//! The partner domain mints a short-lived token for a signed-in user and
//! redirects to this domain's login endpoint with it. This SDK verifies that
//! token locally with the shared secret (no network calls).
//!
//! # Example
//!
//! ```rust,ignore
//! use xdauth_sdk::{ClientConfig, CrossDomainClient};
//!
//! let client = CrossDomainClient::new(ClientConfig {
//!     domain: "b.example".to_string(),
//!     secret: std::env::var("XDAUTH_SECRET_KEY")?.into(),
//!     leeway_seconds: Some(30),
//! })?;
//!
//! // On the login endpoint
//! let claims = client.authenticate_redirect(request_query)?;
//! println!("User ID: {:?}", claims.subject());
//! ```

mod client;
mod error;
mod extract;

pub use client::{ClientConfig, CrossDomainClient, login_url};
pub use error::ClientError;
pub use extract::{
    Headers, TOKEN_COOKIE, TOKEN_QUERY_PARAM, extract_from_cookie, extract_from_header,
    extract_from_query,
};

// Re-export shared types for convenience
pub use xdauth_token::{Audience, ClaimSet, ClaimValue, ErrorCode, TokenError};
