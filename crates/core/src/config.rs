use url::Url;

use crate::client::ClientError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";
pub const BACKEND_URL_ENV: &str = "FACTLENS_BACKEND_URL";

/// Where the analysis backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|_| ClientError::InvalidBaseUrl(raw.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
            return Err(ClientError::InvalidBaseUrl(raw));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Read the base URL from `FACTLENS_BACKEND_URL`, falling back to the loopback default.
    pub fn from_env() -> Result<Self, ClientError> {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analyze_endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }
}
