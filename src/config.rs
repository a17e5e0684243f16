use std::env;

pub const API_URL_ENV: &str = "SAKHATYPE_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read the base URL once from the environment, falling back to the local dev server.
    pub fn from_env() -> Self {
        env::var(API_URL_ENV)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(Self::with_base_url)
            .unwrap_or_default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
