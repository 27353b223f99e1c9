//! Types for verification service results

use chrono::{DateTime, Utc};

/// Acknowledgement of an issued and delivered code
///
/// The code itself is never part of the result.
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Normalized address the code was sent to
    pub email: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the caller may request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyCodeResult {
    /// Normalized address that was verified
    pub email: String,
    /// Attempts consumed, including the successful one
    pub attempts_used: u32,
    /// When the verification happened
    pub verified_at: DateTime<Utc>,
}
