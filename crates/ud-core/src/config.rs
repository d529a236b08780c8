//! Configuration types and loading
//!
//! Environment-based configuration with defaults suitable for local
//! development. The static bearer-token table is ordinary configuration data
//! here and gets injected into the authenticator at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL; when absent the server falls back to the in-memory store.
    pub url: Option<String>,
    pub pool_size: u32,
}

/// Authentication configuration: the full token table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub tokens: Vec<StaticToken>,
}

/// One bearer token mapped to an identity and its role set.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StaticToken {
    pub token: String,
    pub identity: String,
    pub roles: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                pool_size: 10,
            },
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tokens: vec![
                StaticToken {
                    token: "testAdmin".to_string(),
                    identity: "admin".to_string(),
                    roles: vec!["admin".to_string(), "user".to_string()],
                },
                StaticToken {
                    token: "testUser".to_string(),
                    identity: "user".to_string(),
                    roles: vec!["user".to_string()],
                },
            ],
        }
    }
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().unwrap_or(8080);
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }
        if let Ok(size) = std::env::var("DATABASE_POOL_SIZE") {
            config.database.pool_size = size.parse().unwrap_or(10);
        }

        // Optional override of the whole token table, as a JSON array of
        // {token, identity, roles} entries.
        if let Ok(raw) = std::env::var("AUTH_TOKENS") {
            config.auth.tokens =
                serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid {
                    key: "AUTH_TOKENS",
                    message: e.to_string(),
                })?;
        }

        Ok(config)
    }

    pub fn server_addr(&self) -> std::net::SocketAddr {
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        std::net::SocketAddr::new(ip, self.server.port)
    }
}
