//! MySQL implementation of the OtpRepository trait.
//!
//! Durable code storage: one row per email address, replaced on every
//! issuance. Expiry is enforced in every read and write predicate, and
//! expired rows are removed by an explicit sweep.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::Row;
use tracing::{debug, error};

use ev_core::domain::entities::OtpRecord;
use ev_core::errors::DomainError;
use ev_core::repositories::OtpRepository;
use ev_shared::utils::mask_email;

use crate::database::DatabasePool;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: DatabasePool,
    /// Lifetime of an issued code
    expiry_window: Duration,
}

impl MySqlOtpRepository {
    /// Create a new MySQL code repository
    ///
    /// # Arguments
    /// * `pool` - Shared MySQL connection pool
    /// * `expiry_window` - How long an issued code stays valid
    pub fn new(pool: DatabasePool, expiry_window: Duration) -> Self {
        Self {
            pool,
            expiry_window,
        }
    }

    /// Oldest `created_at` still considered live
    fn cutoff(&self) -> DateTime<Utc> {
        Utc::now() - self.expiry_window
    }

    fn storage_error(operation: &str, email: &str, e: sqlx::Error) -> DomainError {
        error!(
            email = %mask_email(email),
            error = %e,
            operation = operation,
            "Code storage query failed"
        );
        DomainError::storage(format!("Failed to {} verification code: {}", operation, e))
    }

    /// Convert database row to OtpRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        Ok(OtpRecord {
            email: row
                .try_get("email")
                .map_err(|e| DomainError::storage(format!("Failed to get email: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::storage(format!("Failed to get code: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage(format!("Failed to get created_at: {}", e)))?,
            attempts: row
                .try_get("attempts")
                .map_err(|e| DomainError::storage(format!("Failed to get attempts: {}", e)))?,
            verified: row
                .try_get("verified")
                .map_err(|e| DomainError::storage(format!("Failed to get verified: {}", e)))?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn store(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO otp_verifications (email, code, created_at, attempts, verified)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                created_at = VALUES(created_at),
                attempts = VALUES(attempts),
                verified = VALUES(verified)
        "#;

        sqlx::query(query)
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.created_at)
            .bind(record.attempts)
            .bind(record.verified)
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("store", &record.email, e))?;

        debug!(email = %mask_email(&record.email), "Stored verification code");
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT email, code, created_at, attempts, verified
            FROM otp_verifications
            WHERE email = ? AND created_at > ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(self.cutoff())
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("load", email, e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn update(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE otp_verifications
            SET attempts = ?, verified = ?
            WHERE email = ? AND created_at = ? AND attempts < ? AND created_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(record.attempts)
            .bind(record.verified)
            .bind(&record.email)
            .bind(record.created_at)
            .bind(record.attempts)
            .bind(self.cutoff())
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("update", &record.email, e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otp_verifications WHERE email = ?")
            .bind(email)
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("delete", email, e))?;

        Ok(())
    }

    async fn delete_issued(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE email = ? AND created_at = ?")
            .bind(&record.email)
            .bind(record.created_at)
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("delete", &record.email, e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn sweep_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "DELETE FROM otp_verifications WHERE verified = FALSE AND created_at < ?",
        )
        .bind(self.cutoff())
        .execute(self.pool.get_pool())
        .await
        .map_err(|e| DomainError::storage(format!("Failed to sweep expired codes: {}", e)))?;

        Ok(result.rows_affected())
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.pool.health_check().await?)
    }
}
