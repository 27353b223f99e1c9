//! One-time code policy configuration

use serde::{Deserialize, Serialize};

/// Default number of digits in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default lifetime of an issued code in minutes
pub const DEFAULT_EXPIRY_MINUTES: i64 = 10;

/// Default number of verification attempts per issued code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default minimum interval between two issuances for one address, in minutes
pub const DEFAULT_RESEND_DELAY_MINUTES: i64 = 1;

/// Upper bound for the expiry window and the resend delay, in minutes (one week)
pub const MAX_WINDOW_MINUTES: i64 = 7 * 24 * 60;

/// Policy knobs for issuing and checking one-time codes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of decimal digits per code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minutes after issuance before a code is treated as absent
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    /// Verification attempts allowed per issued code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Minutes that must pass before a new code can be issued
    #[serde(default = "default_resend_delay_minutes")]
    pub resend_delay_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            resend_delay_minutes: DEFAULT_RESEND_DELAY_MINUTES,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_length: env_or("OTP_CODE_LENGTH", DEFAULT_CODE_LENGTH),
            expiry_minutes: env_or("OTP_EXPIRY_MINUTES", DEFAULT_EXPIRY_MINUTES),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            resend_delay_minutes: env_or("OTP_RESEND_DELAY_MINUTES", DEFAULT_RESEND_DELAY_MINUTES),
        }
        .sanitized()
    }

    /// Set the code length
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self.sanitized()
    }

    /// Set the expiry window in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = minutes;
        self.sanitized()
    }

    /// Set the maximum number of attempts
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self.sanitized()
    }

    /// Set the resend delay in minutes
    pub fn with_resend_delay_minutes(mut self, minutes: i64) -> Self {
        self.resend_delay_minutes = minutes;
        self.sanitized()
    }

    // A zero-length code or a zero attempt budget would make every code unusable.
    fn sanitized(mut self) -> Self {
        self.code_length = self.code_length.clamp(1, 12);
        self.max_attempts = self.max_attempts.max(1);
        self.expiry_minutes = self.expiry_minutes.clamp(0, MAX_WINDOW_MINUTES);
        self.resend_delay_minutes = self.resend_delay_minutes.clamp(0, MAX_WINDOW_MINUTES);
        self
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_expiry_minutes() -> i64 {
    DEFAULT_EXPIRY_MINUTES
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_resend_delay_minutes() -> i64 {
    DEFAULT_RESEND_DELAY_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.expiry_minutes, 10);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.resend_delay_minutes, 1);
    }

    #[test]
    fn test_otp_config_builders_clamp_values() {
        let config = OtpConfig::default()
            .with_code_length(0)
            .with_max_attempts(0)
            .with_expiry_minutes(-5);

        assert_eq!(config.code_length, 1);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.expiry_minutes, 0);
    }

    #[test]
    fn test_otp_config_caps_windows() {
        let config = OtpConfig::default()
            .with_expiry_minutes(i64::MAX)
            .with_resend_delay_minutes(i64::MAX / 60);

        assert_eq!(config.expiry_minutes, MAX_WINDOW_MINUTES);
        assert_eq!(config.resend_delay_minutes, MAX_WINDOW_MINUTES);
    }

    #[test]
    fn test_otp_config_deserialize_with_defaults() {
        let config: OtpConfig = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.code_length, DEFAULT_CODE_LENGTH);
        assert_eq!(config.expiry_minutes, DEFAULT_EXPIRY_MINUTES);
    }
}
