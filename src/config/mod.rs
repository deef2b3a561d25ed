//! Configuration module for the offers backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the offers database
    pub db_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Raised when an environment variable holds an unusable value.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidHost(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "Invalid PORT value: {:?}", value),
            ConfigError::InvalidHost(value) => write!(f, "Invalid HOST value: {:?}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_url = env::var("DB_URL")
            .unwrap_or_else(|_| "sqlite:./data/offers.sqlite?mode=rwc".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let host: IpAddr = host.parse().map_err(|_| ConfigError::InvalidHost(host))?;

        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_url,
            bind_addr: SocketAddr::new(host, port),
            log_level,
        })
    }
}
