//! Configuration for the verification service

use chrono::Duration;
use ev_shared::config::otp::MAX_WINDOW_MINUTES;
use ev_shared::config::OtpConfig;

/// How many times a verification restarts after losing a race to another writer
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Code length, expiry, attempt budget and resend delay
    pub otp: OtpConfig,
    /// Restarts of fetch-mutate-persist when a conditional update is rejected
    pub max_conflict_retries: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            otp: OtpConfig::default(),
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl From<OtpConfig> for VerificationServiceConfig {
    fn from(otp: OtpConfig) -> Self {
        Self {
            otp,
            ..Default::default()
        }
    }
}

impl VerificationServiceConfig {
    /// Lifetime of an issued code
    pub fn expiry_window(&self) -> Duration {
        Duration::minutes(self.otp.expiry_minutes.clamp(0, MAX_WINDOW_MINUTES))
    }

    /// Minimum interval between issuances for one address
    pub fn resend_delay(&self) -> Duration {
        Duration::minutes(self.otp.resend_delay_minutes.clamp(0, MAX_WINDOW_MINUTES))
    }
}
