use xdauth_token::{EnvKey, TokenConfig};

pub struct AppConfig {
    pub token: TokenConfig,
    /// Name of the environment variable holding the signing key.
    pub key_var: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let key_var = std::env::var("XDAUTH_SECRET_KEY_VAR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| EnvKey::DEFAULT_VAR.to_string());

        Self {
            token: TokenConfig::from_env(),
            key_var,
        }
    }

    pub fn key_provider(&self) -> EnvKey {
        EnvKey::new(self.key_var.clone())
    }
}
