use serde::{Deserialize, Serialize};

use crate::random::{EntropySource, generate_token_id};
use crate::{ClaimSet, TokenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    #[serde(rename = "token.issued")]
    TokenIssued,
    #[serde(rename = "token.validated")]
    TokenValidated,
    #[serde(rename = "token.rejected")]
    TokenRejected,
}

impl AuthEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenIssued => "token.issued",
            Self::TokenValidated => "token.validated",
            Self::TokenRejected => "token.rejected",
        }
    }
}

/// Subject details attached to an audit event. Never includes the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub subject: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetadata {
    /// Error code of a rejected token
    pub failure: Option<String>,
    /// True when the rejection points at tampering or a wrong key
    pub security_relevant: bool,
    pub token_id: Option<String>,
}

/// Audit record of one issue/validate outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthEvent {
    pub event_id: String,
    pub event_type: AuthEventType,
    /// Unix timestamp
    pub timestamp: i64,
    pub source_domain: Option<String>,
    pub target_domain: Option<String>,
    pub user_info: UserInfo,
    pub security_metadata: SecurityMetadata,
}

impl AuthEvent {
    fn new(event_type: AuthEventType, timestamp: i64, entropy: &dyn EntropySource) -> Self {
        Self {
            event_id: generate_token_id(entropy),
            event_type,
            timestamp,
            source_domain: None,
            target_domain: None,
            user_info: UserInfo::default(),
            security_metadata: SecurityMetadata::default(),
        }
    }

    /// Event for a successfully issued or validated token.
    pub fn for_claims(
        event_type: AuthEventType,
        claims: &ClaimSet,
        timestamp: i64,
        entropy: &dyn EntropySource,
    ) -> Self {
        let mut event = Self::new(event_type, timestamp, entropy);
        event.source_domain = claims.issuer().map(str::to_string);
        event.target_domain = claims.audience().map(|aud| match aud {
            crate::Audience::Single(aud) => aud,
            crate::Audience::Multiple(auds) => auds.join(","),
        });
        event.user_info = UserInfo {
            subject: claims.subject().map(str::to_string),
            email: claims.email().map(str::to_string),
        };
        event.security_metadata.token_id = claims.token_id().map(str::to_string);
        event
    }

    pub fn rejected(error: &TokenError, timestamp: i64, entropy: &dyn EntropySource) -> Self {
        let mut event = Self::new(AuthEventType::TokenRejected, timestamp, entropy);
        event.security_metadata.failure = Some(error.code().to_string());
        event.security_metadata.security_relevant = error.is_security_relevant();
        event
    }
}

/// Receives audit events. Delivery (queue, database) belongs to the
/// application; implementations must not block for long.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuthEvent);
}

/// Writes events as structured `tracing` records under the `xdauth::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuthEvent) {
        if event.security_metadata.security_relevant {
            tracing::warn!(
                target: "xdauth::audit",
                event_id = %event.event_id,
                event_type = event.event_type.as_str(),
                failure = event.security_metadata.failure.as_deref(),
                security = true,
                "Auth event"
            );
        } else {
            tracing::info!(
                target: "xdauth::audit",
                event_id = %event.event_id,
                event_type = event.event_type.as_str(),
                subject = event.user_info.subject.as_deref(),
                source_domain = event.source_domain.as_deref(),
                target_domain = event.target_domain.as_deref(),
                failure = event.security_metadata.failure.as_deref(),
                "Auth event"
            );
        }
    }
}
