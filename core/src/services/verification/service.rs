//! Main verification service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use ev_shared::utils::{is_valid_code, is_valid_email, mask_email, normalize_email};

use crate::domain::entities::OtpRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::code_generator::SecureCodeGenerator;
use super::config::VerificationServiceConfig;
use super::locks::KeyedLocks;
use super::template::{render_otp_email, OTP_EMAIL_SUBJECT};
use super::traits::{CodeGenerator, EmailNotifier};
use super::types::{SendCodeResult, VerifyCodeResult};

/// Verification service driving the one-time code lifecycle for email addresses
///
/// Holds no record state of its own; every decision is made against the
/// repository while the per-address lock is held.
pub struct VerificationService<R: OtpRepository + ?Sized, N: EmailNotifier + ?Sized> {
    /// Persistence backend for issued codes
    repository: Arc<R>,
    /// Outbound email delivery
    notifier: Arc<N>,
    /// Code source
    generator: Arc<dyn CodeGenerator>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Per-address serialization
    locks: KeyedLocks,
}

impl<R: OtpRepository + ?Sized, N: EmailNotifier + ?Sized> VerificationService<R, N> {
    /// Create a new verification service using the CSPRNG code generator
    ///
    /// # Arguments
    ///
    /// * `repository` - Persistence backend
    /// * `notifier` - Email delivery implementation
    /// * `config` - Service configuration
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: VerificationServiceConfig) -> Self {
        let generator = Arc::new(SecureCodeGenerator::new(config.otp.code_length));
        Self::with_generator(repository, notifier, generator, config)
    }

    /// Create a service with an explicit code generator
    pub fn with_generator(
        repository: Arc<R>,
        notifier: Arc<N>,
        generator: Arc<dyn CodeGenerator>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            generator,
            config,
            locks: KeyedLocks::new(),
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Name of the active storage backend
    pub fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }

    /// Check that the storage backend is reachable
    pub async fn health_check(&self) -> DomainResult<bool> {
        self.repository.health_check().await
    }

    /// Issue a new code for an address and deliver it by email
    ///
    /// This method:
    /// 1. Validates and normalizes the address
    /// 2. Sweeps expired records (best effort)
    /// 3. Rejects the request while the resend delay is running
    /// 4. Stores a fresh record, replacing any previous one
    /// 5. Sends the code, removing the record again if delivery fails
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Expiry and next resend instants; never the code
    /// * `Err(DomainError)` - Validation, throttle, storage or delivery failure
    pub async fn send_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let email = Self::normalized_email(email)?;
        let _guard = self.locks.acquire(&email).await;

        self.sweep_expired().await;

        let now = Utc::now();
        if let Some(existing) = self.repository.get(&email).await? {
            if let Some(wait) = existing.resend_wait(now, self.config.resend_delay()) {
                let retry_after_secs = Self::retry_after_secs(wait, self.config.resend_delay());
                tracing::warn!(
                    email = %mask_email(&email),
                    retry_after_secs = retry_after_secs,
                    event = "resend_throttled",
                    "Verification code requested before resend delay elapsed"
                );
                return Err(DomainError::Throttled { retry_after_secs });
            }
        }

        let record = OtpRecord::issue(email.clone(), self.generator.generate());
        self.repository.store(&record).await?;

        tracing::info!(
            email = %mask_email(&email),
            backend = self.repository.backend_name(),
            event = "otp_generated",
            "Verification code generated"
        );

        let body = render_otp_email(&record.code, self.config.otp.expiry_minutes);
        if let Err(reason) = self.notifier.send(&email, OTP_EMAIL_SUBJECT, &body).await {
            tracing::error!(
                email = %mask_email(&email),
                error = %reason,
                event = "otp_delivery_failed",
                "Failed to deliver verification code"
            );
            if let Err(e) = self.repository.delete_issued(&record).await {
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "otp_rollback_failed",
                    "Failed to remove undelivered verification code"
                );
            }
            return Err(DomainError::delivery(reason));
        }

        tracing::info!(
            email = %mask_email(&email),
            event = "otp_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult {
            email,
            expires_at: record.expires_at(self.config.expiry_window()),
            next_resend_at: record.created_at + self.config.resend_delay(),
        })
    }

    /// Check a code submitted for an address
    ///
    /// The attempt is counted before the comparison, so a failed guess is
    /// always persisted even if the caller goes away.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        let email = Self::normalized_email(email)?;
        let code = code.trim();
        if !is_valid_code(code, self.config.otp.code_length) {
            return Err(DomainError::validation(format!(
                "Verification code must be {} digits",
                self.config.otp.code_length
            )));
        }

        let _guard = self.locks.acquire(&email).await;

        for attempt in 0..=self.config.max_conflict_retries {
            if let Some(result) = self.verify_once(&email, code).await? {
                return Ok(result);
            }
            tracing::debug!(
                email = %mask_email(&email),
                retry = attempt + 1,
                event = "otp_update_conflict",
                "Verification record changed concurrently, retrying"
            );
        }

        tracing::error!(
            email = %mask_email(&email),
            event = "otp_update_conflict_exhausted",
            "Verification record kept changing concurrently"
        );
        Err(DomainError::storage(
            "verification record was modified concurrently",
        ))
    }

    /// Remove expired records, logging instead of failing
    pub async fn sweep_expired(&self) {
        match self.repository.sweep_expired().await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(
                removed = removed,
                event = "otp_sweep",
                "Expired verification codes removed"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                event = "otp_sweep_failed",
                "Failed to sweep expired verification codes"
            ),
        }
    }

    /// One fetch-mutate-persist pass; `Ok(None)` means a conditional write lost a race
    async fn verify_once(&self, email: &str, code: &str) -> DomainResult<Option<VerifyCodeResult>> {
        let max_attempts = self.config.otp.max_attempts;

        let mut record = self
            .repository
            .get(email)
            .await?
            .ok_or(DomainError::NotFound)?;

        if record.verified {
            return Err(DomainError::AlreadyVerified);
        }

        if record.is_exhausted(max_attempts) {
            if !self.repository.delete_issued(&record).await? {
                return Ok(None);
            }
            return Err(DomainError::AttemptsExhausted);
        }

        record.record_attempt();

        if !record.matches(code) {
            if record.is_exhausted(max_attempts) {
                if !self.repository.delete_issued(&record).await? {
                    return Ok(None);
                }
                tracing::warn!(
                    email = %mask_email(email),
                    attempts = record.attempts,
                    event = "otp_attempts_exhausted",
                    "Verification attempts exhausted"
                );
                return Err(DomainError::AttemptsExhausted);
            }

            if !self.repository.update(&record).await? {
                return Ok(None);
            }

            let remaining_attempts = record.remaining_attempts(max_attempts);
            tracing::warn!(
                email = %mask_email(email),
                attempts = record.attempts,
                remaining_attempts = remaining_attempts,
                event = "otp_mismatch",
                "Invalid verification code"
            );
            return Err(DomainError::Mismatch { remaining_attempts });
        }

        record.mark_verified();
        if !self.repository.update(&record).await? {
            return Ok(None);
        }

        tracing::info!(
            email = %mask_email(email),
            attempts = record.attempts,
            event = "otp_verified",
            "Email verified"
        );

        Ok(Some(VerifyCodeResult {
            email: email.to_string(),
            attempts_used: record.attempts,
            verified_at: Utc::now(),
        }))
    }

    fn normalized_email(email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::validation("Invalid email format"));
        }
        Ok(email)
    }

    fn retry_after_secs(wait: Duration, delay: Duration) -> i64 {
        let millis = wait.num_milliseconds().max(0);
        let secs = (millis + 999) / 1000;
        secs.clamp(0, delay.num_seconds().max(0))
    }
}

#[cfg(test)]
mod retry_after_tests {
    use super::*;
    use crate::repositories::InMemoryOtpRepository;

    type Service = VerificationService<InMemoryOtpRepository, dyn EmailNotifier>;

    #[test]
    fn test_retry_after_rounds_up_and_clamps() {
        let delay = Duration::minutes(1);
        assert_eq!(Service::retry_after_secs(Duration::milliseconds(59_001), delay), 60);
        assert_eq!(Service::retry_after_secs(Duration::seconds(30), delay), 30);
        assert_eq!(Service::retry_after_secs(Duration::milliseconds(1), delay), 1);
        assert_eq!(Service::retry_after_secs(Duration::seconds(90), delay), 60);
        assert_eq!(Service::retry_after_secs(Duration::seconds(-5), delay), 0);
    }
}
