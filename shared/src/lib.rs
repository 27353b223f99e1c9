//! Shared utilities and common types for the MailCode server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (email validation, masking, code format checks)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, Environment, LoggingConfig, OtpConfig,
    ServerConfig, StorageBackendKind, StorageConfig,
};
pub use utils::{email, validation};
