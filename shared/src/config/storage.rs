//! Persistence backend selection

use serde::{Deserialize, Serialize};

/// Which store holds issued codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// MySQL table with upsert-by-email and explicit expiry sweeping
    Mysql,
    /// Redis keys with native expiry
    Redis,
    /// Process-local map (development and tests)
    Memory,
}

impl Default for StorageBackendKind {
    fn default() -> Self {
        StorageBackendKind::Memory
    }
}

impl std::fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendKind::Mysql => write!(f, "mysql"),
            StorageBackendKind::Redis => write!(f, "redis"),
            StorageBackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "sql" | "durable" => Ok(StorageBackendKind::Mysql),
            "redis" | "ephemeral" => Ok(StorageBackendKind::Redis),
            "memory" | "mem" | "in-memory" => Ok(StorageBackendKind::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: StorageBackendKind,
}

impl StorageConfig {
    /// Read `OTP_STORAGE_BACKEND`, falling back to the in-memory store
    pub fn from_env() -> Self {
        let backend = std::env::var("OTP_STORAGE_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        Self { backend }
    }
}
