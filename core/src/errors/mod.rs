//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors surfaced by the one-time code lifecycle
///
/// Every variant carries a human-readable message; `error_code` gives a stable
/// machine-readable identifier for the outer layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed email address or code
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A new code was requested before the resend delay elapsed
    #[error("Please wait {retry_after_secs} seconds before requesting a new code")]
    Throttled { retry_after_secs: i64 },

    /// No active code for this address (never issued, expired, or removed)
    #[error("No verification code found or code has expired")]
    NotFound,

    /// The active code was already used successfully
    #[error("Email is already verified")]
    AlreadyVerified,

    /// The attempt budget for the active code is spent
    #[error("Maximum verification attempts exceeded. Please request a new code")]
    AttemptsExhausted,

    /// Wrong code; one attempt was consumed
    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    Mismatch { remaining_attempts: u32 },

    /// The notifier could not deliver the code
    #[error("Failed to deliver verification code: {message}")]
    Delivery { message: String },

    /// The persistence backend failed or reported an inconsistency
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    /// Shorthand for a delivery failure
    pub fn delivery(message: impl Into<String>) -> Self {
        DomainError::Delivery {
            message: message.into(),
        }
    }

    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Throttled { .. } => "RESEND_THROTTLED",
            DomainError::NotFound => "CODE_NOT_FOUND",
            DomainError::AlreadyVerified => "ALREADY_VERIFIED",
            DomainError::AttemptsExhausted => "ATTEMPTS_EXHAUSTED",
            DomainError::Mismatch { .. } => "CODE_MISMATCH",
            DomainError::Delivery { .. } => "DELIVERY_FAILED",
            DomainError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Whether the failure originates from infrastructure rather than user input
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, DomainError::Delivery { .. } | DomainError::Storage { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
