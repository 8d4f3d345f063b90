//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WEBSHOP_BASE_URL` - Public URL used for checkout redirects
//! - `STRIPE_SECRET_KEY` - Payment provider secret API key
//!
//! ## Optional
//! - `WEBSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `WEBSHOP_PORT` - Listen port (default: 3000)
//! - `WEBSHOP_DATA_DIR` - Directory for persisted store snapshots
//!   (default: `data`)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Webshop application configuration.
#[derive(Debug, Clone)]
pub struct WebshopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build checkout success/cancel redirects
    pub base_url: String,
    /// Directory holding the persisted store snapshots
    pub data_dir: PathBuf,
    /// Payment provider secret API key
    pub stripe_secret_key: SecretString,
}

impl WebshopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("WEBSHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WEBSHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("WEBSHOP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WEBSHOP_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("WEBSHOP_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let data_dir = PathBuf::from(get_env_or_default("WEBSHOP_DATA_DIR", "data"));
        let stripe_secret_key = get_required_secret("STRIPE_SECRET_KEY")?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            stripe_secret_key,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
