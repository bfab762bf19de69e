//! Connection settings for the hosted database.

use crate::error::{CloudError, Result};

/// Environment variable holding the project URL.
pub const SUPABASE_URL_ENV: &str = "FINANCE_TRACKER_SUPABASE_URL";
/// Environment variable holding the public (anon) API key.
pub const SUPABASE_ANON_KEY_ENV: &str = "FINANCE_TRACKER_SUPABASE_ANON_KEY";

#[derive(Clone)]
pub struct CloudConfig {
    pub base_url: String,
    pub api_key: String,
    /// Session token of the signed-in user. Without it requests run as the
    /// anonymous role and row-level security hides user data.
    pub access_token: Option<String>,
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl CloudConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    /// Reads the project URL and anon key from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(SUPABASE_URL_ENV)
            .ok()
            .map(|v| normalize_base_url(&v))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CloudError::config(format!("{} is not set", SUPABASE_URL_ENV)))?;
        let api_key = std::env::var(SUPABASE_ANON_KEY_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CloudError::config(format!("{} is not set", SUPABASE_ANON_KEY_ENV)))?;

        Ok(Self {
            base_url,
            api_key,
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Token sent as the bearer credential.
    pub fn bearer_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}
