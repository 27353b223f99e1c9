//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `otp` - Code length, expiry, attempt budget and resend delay
//! - `storage` - Which persistence backend holds issued codes
//! - `database` - MySQL connection and pool configuration
//! - `cache` - Redis connection configuration
//! - `email` - SMTP delivery configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackendKind, StorageConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// One-time code policy
    #[serde(default)]
    pub otp: OtpConfig,

    /// Backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// MySQL configuration (used by the `mysql` backend)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration (used by the `redis` backend)
    #[serde(default)]
    pub cache: CacheConfig,

    /// SMTP configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            otp: OtpConfig::from_env(),
            storage: StorageConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            server: ServerConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_deserializes_partial_document() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "environment": "production",
                "storage": { "backend": "mysql" },
                "otp": { "expiry_minutes": 15 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.storage.backend, StorageBackendKind::Mysql);
        assert_eq!(config.otp.expiry_minutes, 15);
        assert_eq!(config.otp.max_attempts, 3);
        assert_eq!(config.server.port, 3000);
    }
}
