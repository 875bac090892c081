//! Cross-domain client implementation.

use secrecy::{ExposeSecret, SecretString};
use url::Url;
use xdauth_token::claims::AUDIENCE;
use xdauth_token::{Audience, ClaimSet, StaticKey, TokenConfig, TokenService};

use crate::error::ClientError;
use crate::extract::{
    Headers, TOKEN_QUERY_PARAM, extract_from_cookie, extract_from_header, extract_from_query,
};

/// Configuration for the cross-domain client.
#[derive(Debug)]
pub struct ClientConfig {
    /// This domain (e.g., "b.example"), matched against the token's `aud`
    pub domain: String,

    /// Secret shared with the issuing domain
    pub secret: SecretString,

    /// Clock skew tolerance in seconds (default: 0)
    pub leeway_seconds: Option<u64>,
}

/// Client for a domain that accepts tokens minted by its partner domain.
pub struct CrossDomainClient {
    domain: String,
    service: TokenService<StaticKey>,
}

impl CrossDomainClient {
    /// Create a new client.
    ///
    /// # Returns
    /// A configured `CrossDomainClient` or an error if configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.secret.expose_secret().is_empty() {
            return Err(ClientError::Config("secret is required".into()));
        }

        if config.domain.is_empty() {
            return Err(ClientError::Config("domain is required".into()));
        }

        let token_config = TokenConfig {
            leeway_seconds: config.leeway_seconds.unwrap_or(0),
            ..TokenConfig::default()
        };
        let key = StaticKey::new(config.secret.expose_secret().as_bytes());

        Ok(Self {
            domain: config.domain,
            service: TokenService::new(token_config, key),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// Tokens that name an audience must include this client's domain. An
    /// `aud` that is neither a string nor an array of strings names no one.
    /// Tokens without `aud` are accepted.
    pub fn verify_token(&self, token: &str) -> Result<ClaimSet, ClientError> {
        let claims = self.service.validate_token(token)?;

        let Some(raw) = claims.get(AUDIENCE) else {
            return Ok(claims);
        };
        let audience = claims.audience();
        if audience.as_ref().is_some_and(|aud| aud.contains(&self.domain)) {
            return Ok(claims);
        }

        tracing::warn!(
            expected = %self.domain,
            security = true,
            "Token audience does not include this domain"
        );
        let actual = match audience {
            Some(Audience::Single(aud)) => aud,
            Some(Audience::Multiple(auds)) => auds.join(","),
            None => format!("{:?}", raw),
        };
        Err(ClientError::AudienceMismatch {
            expected: self.domain.clone(),
            actual,
        })
    }

    /// Extract a token from request headers.
    ///
    /// Tries Authorization: Bearer header first, then falls back to cookies.
    pub fn extract_token<H: Headers>(&self, headers: &H) -> Option<String> {
        if let Some(token) = headers.get_authorization().and_then(extract_from_header) {
            return Some(token.to_string());
        }

        headers.get_cookie().and_then(extract_from_cookie)
    }

    /// Authenticate a request by extracting and verifying the token.
    pub fn authenticate<H: Headers>(&self, headers: &H) -> Result<ClaimSet, ClientError> {
        let token = self
            .extract_token(headers)
            .ok_or_else(|| ClientError::InvalidToken("No token found".into()))?;

        self.verify_token(&token)
    }

    /// Verify the token carried in a login redirect's query string.
    pub fn authenticate_redirect(&self, query: &str) -> Result<ClaimSet, ClientError> {
        let token = extract_from_query(query)
            .ok_or_else(|| ClientError::InvalidToken("Authentication token is missing".into()))?;

        self.verify_token(&token)
    }
}

/// Builds the partner domain's login URL carrying `token`.
pub fn login_url(login_endpoint: &str, token: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(login_endpoint)?;
    url.query_pairs_mut().append_pair(TOKEN_QUERY_PARAM, token);
    Ok(url)
}
