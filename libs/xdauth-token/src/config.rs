use env_helpers::get_env_default;
use time::Duration;

use crate::Audience;

/// Token lifetime used when neither the caller nor the environment sets one.
pub const DEFAULT_LIFETIME_SECS: i64 = 300;

/// Settings for a [`TokenService`](crate::TokenService).
///
/// Resolved once by the application and passed in; the token core reads no
/// global configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// When false, the service refuses to issue or accept tokens.
    pub enabled: bool,
    pub default_lifetime: Duration,
    /// Tolerance for clock skew between the two domains when checking `exp`.
    pub leeway_seconds: u64,
    /// Stamped as `iss` on identity tokens (typically this domain's base URL).
    pub issuer: Option<String>,
    /// Stamped as `aud` on identity tokens (the other domain).
    pub audience: Option<Audience>,
    /// When false, no events reach the audit sink. Tracing is unaffected.
    pub audit_enabled: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_lifetime: Duration::seconds(DEFAULT_LIFETIME_SECS),
            leeway_seconds: 0,
            issuer: None,
            audience: None,
            audit_enabled: true,
        }
    }
}

impl TokenConfig {
    pub fn from_env() -> Self {
        let enabled: bool = get_env_default("XDAUTH_ENABLED", true);
        let lifetime_secs: i64 =
            get_env_default("XDAUTH_TOKEN_LIFETIME_SECS", DEFAULT_LIFETIME_SECS);
        let leeway_seconds: u64 = get_env_default("XDAUTH_LEEWAY_SECS", 0);
        let audit_enabled: bool = get_env_default("XDAUTH_AUDIT_ENABLED", true);
        let issuer: Option<String> = std::env::var("XDAUTH_ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let audience: Option<Audience> = std::env::var("XDAUTH_AUDIENCE")
            .ok()
            .and_then(|raw| Audience::parse_list(&raw));

        Self {
            enabled,
            default_lifetime: Duration::seconds(lifetime_secs),
            leeway_seconds,
            issuer,
            audience,
            audit_enabled,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn with_default_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
