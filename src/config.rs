//! Client configuration.
//!
//! Use the builder methods to customize, or [`ClientConfig::from_env`] to
//! read `QACHAT_*` variables.
//!
//! # Example
//!
//! ```ignore
//! use qachat::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("https://qa.example.edu")
//!     .with_token("eyJhbGciOi...");
//! ```

use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const CHAT_STREAM_PATH: &str = "/api/ai/chat/stream";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "QACHAT_BASE_URL";
pub const ENV_TOKEN: &str = "QACHAT_TOKEN";
pub const ENV_CONNECT_TIMEOUT: &str = "QACHAT_CONNECT_TIMEOUT_SECS";

#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    /// Server root, without a trailing slash
    pub base_url: String,
    /// Bearer token sent as `Authorization`; none means anonymous
    pub token: Option<String>,
    /// Path of the streaming chat endpoint
    pub stream_path: String,
    /// Limit on establishing the connection. Streams themselves are not
    /// time-limited; answers can take minutes.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            stream_path: CHAT_STREAM_PATH.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.stream_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of the streaming chat endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}{}", self.base_url, self.stream_path)
    }

    /// Create config from `QACHAT_BASE_URL`, `QACHAT_TOKEN` and
    /// `QACHAT_CONNECT_TIMEOUT_SECS`; unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(token) = std::env::var(ENV_TOKEN) {
            config = config.with_token(token);
        }

        if let Ok(secs) = std::env::var(ENV_CONNECT_TIMEOUT) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config = config.with_connect_timeout(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Ignoring invalid {}={:?}", ENV_CONNECT_TIMEOUT, secs);
                }
            }
        }

        config
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("stream_path", &self.stream_path)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_TOKEN);
        std::env::remove_var(ENV_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
        assert_eq!(
            config.stream_url(),
            "http://localhost:8080/api/ai/chat/stream"
        );
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_normalizes_values() {
        let config = ClientConfig::new()
            .with_base_url("https://qa.example.edu/")
            .with_stream_path("v2/chat/stream")
            .with_token("  ");
        assert_eq!(config.stream_url(), "https://qa.example.edu/v2/chat/stream");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new().with_token("secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear_env();
        std::env::set_var(ENV_BASE_URL, "http://qa.internal:9000/");
        std::env::set_var(ENV_TOKEN, "tok-123");
        std::env::set_var(ENV_CONNECT_TIMEOUT, "3");

        let config = ClientConfig::from_env();
        clear_env();

        assert_eq!(config.base_url, "http://qa.internal:9000");
        assert_eq!(config.token.as_deref(), Some("tok-123"));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_invalid_timeout() {
        clear_env();
        std::env::set_var(ENV_CONNECT_TIMEOUT, "soon");

        let config = ClientConfig::from_env();
        clear_env();

        assert_eq!(
            config.connect_timeout,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }
}
