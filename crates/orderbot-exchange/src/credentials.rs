//! API credentials.

use orderbot_core::GatewayError;

/// API key pair, loaded once at startup.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load from environment variables.
    ///
    /// Unset and blank variables are both treated as missing.
    pub fn from_env(key_var: &str, secret_var: &str) -> Result<Self, GatewayError> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        };

        match (read(key_var), read(secret_var)) {
            (Some(api_key), Some(api_secret)) => Ok(Self { api_key, api_secret }),
            _ => Err(GatewayError::Configuration(format!(
                "Missing Binance API keys. Please set {} and {} in .env",
                key_var, secret_var
            ))),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
