use std::sync::Arc;

use secrecy::ExposeSecret;
use time::Duration;

use crate::claims::{EMAIL, NAME};
use crate::clock::{Clock, SystemClock};
use crate::events::{AuditSink, AuthEvent, AuthEventType, TracingAuditSink};
use crate::keys::KeyProvider;
use crate::random::{EntropySource, OsEntropy, generate_token_id};
use crate::{ClaimSet, Identity, TokenConfig, TokenError, TokenResult, token};

/// Issues and validates tokens with configuration and collaborators
/// injected by the application.
pub struct TokenService<K, C = SystemClock, E = OsEntropy> {
    config: TokenConfig,
    keys: K,
    clock: C,
    entropy: E,
    audit: Arc<dyn AuditSink>,
}

impl<K: KeyProvider> TokenService<K> {
    pub fn new(config: TokenConfig, keys: K) -> Self {
        Self::with_parts(config, keys, SystemClock, OsEntropy)
    }
}

impl<K, C, E> TokenService<K, C, E>
where
    K: KeyProvider,
    C: Clock,
    E: EntropySource,
{
    pub fn with_parts(config: TokenConfig, keys: K, clock: C, entropy: E) -> Self {
        Self {
            config,
            keys,
            clock,
            entropy,
            audit: Arc::new(TracingAuditSink),
        }
    }

    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Signs `claims`, using the configured default lifetime when `lifetime`
    /// is `None`.
    pub fn generate_token(
        &self,
        claims: ClaimSet,
        lifetime: Option<Duration>,
    ) -> TokenResult<String> {
        self.ensure_enabled()?;

        let lifetime = lifetime.unwrap_or(self.config.default_lifetime);
        let now = self.clock.now();

        let result = self.keys.signing_key().and_then(|key| {
            token::generate(
                claims.clone(),
                lifetime.whole_seconds(),
                key.expose_secret(),
                now,
            )
        });

        match result {
            Ok(token) => {
                tracing::debug!(
                    subject = claims.subject(),
                    lifetime_secs = lifetime.whole_seconds(),
                    "Issued cross-domain token"
                );
                self.record_event(|| {
                    AuthEvent::for_claims(AuthEventType::TokenIssued, &claims, now, &self.entropy)
                });
                Ok(token)
            }
            Err(e) => {
                tracing::error!(code = %e.code(), error = %e, "Failed to issue cross-domain token");
                Err(e)
            }
        }
    }

    pub fn validate_token(&self, token: &str) -> TokenResult<ClaimSet> {
        self.ensure_enabled()?;

        let now = self.clock.now();
        let result = self.keys.signing_key().and_then(|key| {
            token::validate_with_leeway(
                token,
                key.expose_secret(),
                now,
                self.config.leeway_seconds,
            )
        });

        match result {
            Ok(claims) => {
                tracing::debug!(subject = claims.subject(), "Validated cross-domain token");
                self.record_event(|| {
                    AuthEvent::for_claims(AuthEventType::TokenValidated, &claims, now, &self.entropy)
                });
                Ok(claims)
            }
            Err(e) => {
                if e.is_security_relevant() {
                    tracing::warn!(code = %e.code(), security = true, "Rejected cross-domain token");
                } else {
                    tracing::info!(code = %e.code(), "Rejected cross-domain token");
                }
                self.record_event(|| AuthEvent::rejected(&e, now, &self.entropy));
                Err(e)
            }
        }
    }

    /// Claims for carrying `identity` to the other domain: `sub`, `email`,
    /// `name`, the configured `iss`/`aud`, and a fresh `jti`.
    pub fn identity_claims(&self, identity: &Identity) -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.set_subject(identity.id.clone());
        claims.insert(EMAIL, identity.email.clone());
        if let Some(name) = &identity.name {
            claims.insert(NAME, name.clone());
        }
        if let Some(issuer) = &self.config.issuer {
            claims.set_issuer(issuer.clone());
        }
        if let Some(audience) = &self.config.audience {
            claims.set_audience(audience.clone());
        }
        claims.set_token_id(generate_token_id(&self.entropy));
        claims
    }

    pub fn issue_for(&self, identity: &Identity, lifetime: Option<Duration>) -> TokenResult<String> {
        self.generate_token(self.identity_claims(identity), lifetime)
    }

    fn record_event(&self, event: impl FnOnce() -> AuthEvent) {
        if self.config.audit_enabled {
            self.audit.record(&event());
        }
    }

    fn ensure_enabled(&self) -> TokenResult<()> {
        if !self.config.enabled {
            return Err(TokenError::Disabled);
        }
        Ok(())
    }
}
