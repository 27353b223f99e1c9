//! OTP repository trait defining the persistence contract for one-time codes.
//!
//! Every backend stores at most one record per email and never hands out a
//! record past its expiry window, whether or not the underlying store has
//! purged it yet.

use async_trait::async_trait;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for OtpRecord persistence operations
///
/// Implementations are selected at startup and shared behind
/// `Arc<dyn OtpRepository>`. Transport failures surface as
/// `DomainError::Storage`.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert or replace the record for `record.email`
    ///
    /// Must be a single atomic upsert; a new issuance always replaces the
    /// previous record, verified or not.
    async fn store(&self, record: &OtpRecord) -> Result<(), DomainError>;

    /// Fetch the live record for an email
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - A record exists and is inside its expiry window
    /// * `Ok(None)` - No record, or the stored record has expired
    /// * `Err(DomainError)` - Backend failure
    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Persist mutated `attempts` / `verified` for the same issuance
    ///
    /// The write applies only if a live record with the same `email` and
    /// `created_at` exists and its stored attempt count is lower than
    /// `record.attempts`. It never recreates a deleted or expired record.
    ///
    /// # Returns
    /// * `Ok(true)` - The update was applied
    /// * `Ok(false)` - The record is gone, was re-issued, or was advanced by another writer
    async fn update(&self, record: &OtpRecord) -> Result<bool, DomainError>;

    /// Remove the record for an email; absent records are not an error
    async fn delete(&self, email: &str) -> Result<(), DomainError>;

    /// Remove the record only while it is still the issuance in `record`
    ///
    /// Matches on `email` and `created_at`, so a code re-issued since
    /// `record` was read is left in place.
    ///
    /// # Returns
    /// * `Ok(true)` - The issuance was removed
    /// * `Ok(false)` - No record, or a newer issuance replaced it
    async fn delete_issued(&self, record: &OtpRecord) -> Result<bool, DomainError>;

    /// Remove unverified records past the expiry window
    ///
    /// Backends with native expiry return `Ok(0)` without doing any work.
    ///
    /// # Returns
    /// Number of records removed
    async fn sweep_expired(&self) -> Result<u64, DomainError>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Check connectivity to the underlying store
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
