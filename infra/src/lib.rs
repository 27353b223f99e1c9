//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for MailCode, providing
//! concrete storage backends and email delivery for the verification core.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL code storage using SQLx, expired rows swept explicitly
//! - **Cache**: Redis code storage relying on native key expiry
//! - **Email**: SMTP delivery via lettre, plus a logging notifier for development
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use std::sync::Arc;

use ev_core::repositories::{InMemoryOtpRepository, OtpRepository};
use ev_core::services::{EmailNotifier, VerificationServiceConfig};
use ev_shared::config::{AppConfig, Environment, StorageBackendKind};

// Re-export core types for convenience
pub use ev_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and code storage
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Email module - Outbound delivery of verification codes
pub mod email;

use crate::email::{LogEmailNotifier, SmtpEmailNotifier};

/// Infrastructure service container
///
/// Owns the handles opened at startup so they can be closed on shutdown.
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Code storage selected by configuration
    pub repository: Arc<dyn OtpRepository>,
    /// Email delivery
    pub notifier: Arc<dyn EmailNotifier>,
    /// MySQL pool, when the `mysql` backend is active
    #[cfg(feature = "mysql")]
    pub database: Option<database::DatabasePool>,
}

impl InfrastructureServices {
    /// Build a container around already constructed components
    pub fn new(repository: Arc<dyn OtpRepository>, notifier: Arc<dyn EmailNotifier>) -> Self {
        Self {
            repository,
            notifier,
            #[cfg(feature = "mysql")]
            database: None,
        }
    }

    /// Name of the active storage backend
    pub fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }

    /// Release pooled connections
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down infrastructure services...");

        #[cfg(feature = "mysql")]
        {
            if let Some(pool) = &self.database {
                pool.close().await;
            }
        }

        tracing::info!("Infrastructure services shut down");
    }
}

/// Initialize infrastructure services from application configuration
///
/// This function sets up:
/// - The storage backend named by `storage.backend`
/// - Database connection pool or Redis connection, as needed
/// - SMTP transport, or the logging notifier when no SMTP host is configured
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(
        backend = %config.storage.backend,
        "Initializing infrastructure services..."
    );

    let expiry_window = VerificationServiceConfig::from(config.otp.clone()).expiry_window();
    let notifier = create_notifier(config)?;

    let services = match config.storage.backend {
        StorageBackendKind::Mysql => mysql_services(config, expiry_window, notifier).await?,
        StorageBackendKind::Redis => redis_services(config, expiry_window, notifier).await?,
        StorageBackendKind::Memory => {
            tracing::warn!("Using in-memory code storage; codes are lost on restart");
            let repository = InMemoryOtpRepository::new(expiry_window);
            InfrastructureServices::new(Arc::new(repository), notifier)
        }
    };

    tracing::info!(
        backend = services.backend_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(services)
}

#[cfg(feature = "mysql")]
async fn mysql_services(
    config: &AppConfig,
    expiry_window: chrono::Duration,
    notifier: Arc<dyn EmailNotifier>,
) -> Result<InfrastructureServices, InfrastructureError> {
    let pool = database::DatabasePool::new(config.database.clone()).await?;
    pool.run_migrations().await?;
    let repository = database::MySqlOtpRepository::new(pool.clone(), expiry_window);
    let mut services = InfrastructureServices::new(Arc::new(repository), notifier);
    services.database = Some(pool);
    Ok(services)
}

#[cfg(not(feature = "mysql"))]
async fn mysql_services(
    _config: &AppConfig,
    _expiry_window: chrono::Duration,
    _notifier: Arc<dyn EmailNotifier>,
) -> Result<InfrastructureServices, InfrastructureError> {
    Err(InfrastructureError::Config(
        "mysql backend requested but the `mysql` feature is disabled".to_string(),
    ))
}

#[cfg(feature = "redis-cache")]
async fn redis_services(
    config: &AppConfig,
    expiry_window: chrono::Duration,
    notifier: Arc<dyn EmailNotifier>,
) -> Result<InfrastructureServices, InfrastructureError> {
    let client = cache::RedisClient::new(config.cache.clone()).await?;
    let repository = cache::RedisOtpRepository::new(client, expiry_window);
    Ok(InfrastructureServices::new(Arc::new(repository), notifier))
}

#[cfg(not(feature = "redis-cache"))]
async fn redis_services(
    _config: &AppConfig,
    _expiry_window: chrono::Duration,
    _notifier: Arc<dyn EmailNotifier>,
) -> Result<InfrastructureServices, InfrastructureError> {
    Err(InfrastructureError::Config(
        "redis backend requested but the `redis-cache` feature is disabled".to_string(),
    ))
}

fn create_notifier(config: &AppConfig) -> Result<Arc<dyn EmailNotifier>, InfrastructureError> {
    if config.email.is_enabled() {
        Ok(Arc::new(SmtpEmailNotifier::new(&config.email)?))
    } else {
        tracing::warn!("SMTP host not configured; verification emails will only be logged");
        Ok(Arc::new(LogEmailNotifier::new()))
    }
}

/// Load application configuration from `.env` files and the environment
///
/// The environment-specific file (e.g. `.env.production`) is read first so
/// its values win over the shared `.env`; real environment variables win
/// over both.
pub fn load_config() -> AppConfig {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Schema migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Email transport or message error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::storage(error.to_string())
    }
}
