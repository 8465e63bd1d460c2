//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3000)
//! - `CONSOLE_BASE_URL` - Public URL for the console (default: http://127.0.0.1:3000)
//! - `BACKEND_API_URL` - Assistant backend origin (default: http://127.0.0.1:8000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the console
    pub base_url: String,
    /// Assistant backend origin
    pub backend_url: Url,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ConsoleConfig {
    /// Load configuration from the environment.
    ///
    /// Every variable has a sensible local-development default, so a bare
    /// environment yields a working config pointed at a local backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when a set variable fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional_env("CONSOLE_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse()
            .map_err(|e| invalid("CONSOLE_HOST", &e))?;

        let port = match optional_env("CONSOLE_PORT") {
            Some(raw) => raw.parse().map_err(|e| invalid("CONSOLE_PORT", &e))?,
            None => DEFAULT_PORT,
        };

        let base_url = optional_env("CONSOLE_BASE_URL")
            .unwrap_or_else(|| format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"));

        let backend_url = optional_env("BACKEND_API_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned())
            .parse()
            .map_err(|e| invalid("BACKEND_API_URL", &e))?;

        let sentry_sample_rate = match optional_env("SENTRY_SAMPLE_RATE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("SENTRY_SAMPLE_RATE", &e))?,
            None => 1.0,
        };

        let sentry_traces_sample_rate = match optional_env("SENTRY_TRACES_SAMPLE_RATE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("SENTRY_TRACES_SAMPLE_RATE", &e))?,
            None => 0.0,
        };

        Ok(Self {
            host,
            port,
            base_url,
            backend_url,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the console is served over HTTPS (drives cookie security).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Read an environment variable, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn invalid(name: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(name.to_owned(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = ConsoleConfig {
            host: DEFAULT_HOST.parse().expect("ip"),
            port: DEFAULT_PORT,
            base_url: "http://127.0.0.1:3000".to_owned(),
            backend_url: DEFAULT_BACKEND_URL.parse().expect("url"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.is_secure());
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = ConsoleConfig {
            host: DEFAULT_HOST.parse().expect("ip"),
            port: 443,
            base_url: "https://console.barakah.example".to_owned(),
            backend_url: DEFAULT_BACKEND_URL.parse().expect("url"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        assert!(config.is_secure());
    }
}
