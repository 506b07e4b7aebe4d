use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the decoding service base URL.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
/// Path appended to the base URL for every submission.
pub const GET_MESSAGE_PATH: &str = "getMessage";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("API base url must use http or https, got {scheme:?}")]
    UnsupportedScheme { scheme: String },
}

/// Settings for talking to the decoding service, injected into the engine at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: Url,
    pub connect_timeout: Duration,
    /// Overall request deadline. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
        })
    }

    /// Reads `API_BASE_URL`, falling back to the local default when unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = lookup(API_BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::new(&base)
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// `<base>/getMessage`, keeping any path prefix on the base.
    pub fn endpoint(&self) -> Url {
        let mut endpoint = self.api_base_url.clone();
        let prefix = endpoint.path().trim_end_matches('/').to_string();
        endpoint.set_path(&format!("{prefix}/{GET_MESSAGE_PATH}"));
        endpoint
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
