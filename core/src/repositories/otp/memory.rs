//! In-memory implementation of OtpRepository
//!
//! Used for local development and as the reference backend in tests. Expiry
//! is enforced logically on every read; storage is purged by `sweep_expired`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// Process-local OTP repository
#[derive(Clone)]
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
    expiry_window: Duration,
}

impl InMemoryOtpRepository {
    /// Create a new repository enforcing the given expiry window
    pub fn new(expiry_window: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            expiry_window,
        }
    }

    /// Number of stored records, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Raw stored record, ignoring expiry
    pub async fn peek(&self, email: &str) -> Option<OtpRecord> {
        self.records.read().await.get(email).cloned()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn store(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        let now = Utc::now();
        Ok(records
            .get(email)
            .filter(|record| !record.is_expired_at(now, self.expiry_window))
            .cloned())
    }

    async fn update(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let now = Utc::now();

        match records.get_mut(&record.email) {
            Some(stored)
                if stored.created_at == record.created_at
                    && stored.attempts < record.attempts
                    && !stored.is_expired_at(now, self.expiry_window) =>
            {
                stored.attempts = record.attempts;
                stored.verified = record.verified;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        self.records.write().await.remove(email);
        Ok(())
    }

    async fn delete_issued(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get(&record.email) {
            Some(stored) if stored.created_at == record.created_at => {
                records.remove(&record.email);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn sweep_expired(&self) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let now = Utc::now();
        let before = records.len();
        records.retain(|_, record| record.verified || !record.is_expired_at(now, self.expiry_window));
        Ok((before - records.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
