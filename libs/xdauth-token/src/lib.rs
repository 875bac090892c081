//! Signed identity tokens for cross-domain authentication.
//!
//! A user signed in on one domain gets a short-lived HS256 token that the
//! cooperating domain validates to sign them in without credentials.
//!
//! This crate provides:
//! - The claim model (`ClaimSet`, `ClaimValue`, `Audience`, `Identity`)
//! - Base64url/JSON segment codec and the HMAC-SHA256 signer
//! - Pure `generate` / `validate` functions over the three-segment wire format
//! - `TokenService`, which wires configuration, key provider, clock and audit sink
//!
//! ```
//! use xdauth_token::{ClaimSet, TokenError, token};
//!
//! let key = b"supersecretkeysupersecretkey1234";
//! let mut claims = ClaimSet::new();
//! claims.set_subject("123");
//!
//! let jwt = token::generate(claims, 300, key, 1700000000).unwrap();
//! let decoded = token::validate(&jwt, key, 1700000100).unwrap();
//! assert_eq!(decoded.subject(), Some("123"));
//!
//! let late = token::validate(&jwt, key, 1700000400);
//! assert!(matches!(late, Err(TokenError::TokenExpired)));
//! ```

pub mod claims;
pub mod clock;
pub mod codec;
mod config;
mod errors;
mod events;
pub mod keys;
pub mod random;
mod service;
pub mod signer;
pub mod token;

pub use claims::{Audience, ClaimSet, ClaimValue, Identity};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DEFAULT_LIFETIME_SECS, TokenConfig};
pub use errors::{ErrorCode, TokenError, TokenResult};
pub use events::{AuditSink, AuthEvent, AuthEventType, SecurityMetadata, TracingAuditSink, UserInfo};
pub use keys::{EnvKey, KeyProvider, StaticKey};
pub use random::{EntropySource, OsEntropy, generate_token_id};
pub use service::TokenService;
