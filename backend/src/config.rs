//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Port the service listens on when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 9500;

/// Course file used when `COURSES_DB_PATH` is unset
pub const DEFAULT_DB_PATH: &str = "db.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// JSON file holding the course collection
    pub db_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            persistence: PersistenceConfig {
                db_path: env::var_os("COURSES_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
