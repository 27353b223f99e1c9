//! One-time code record entity for email verification.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// The single active one-time code for an email address
///
/// The field set is the persisted shape shared by every storage backend, so a
/// record written by one backend can be read back by another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Normalized email address; the natural key
    pub email: String,

    /// Fixed-length digit string sent to the address
    pub code: String,

    /// Issuance timestamp (microsecond precision)
    pub created_at: DateTime<Utc>,

    /// Verification attempts made against this issuance
    pub attempts: u32,

    /// Whether the code was successfully verified
    pub verified: bool,
}

impl OtpRecord {
    /// Creates a fresh record issued now
    ///
    /// The timestamp is truncated to microseconds so it survives a round trip
    /// through `DATETIME(6)` columns and JSON unchanged.
    pub fn issue(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self::issued_at(email, code, Utc::now())
    }

    /// Creates a fresh record with an explicit issuance time
    pub fn issued_at(
        email: impl Into<String>,
        code: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            created_at: created_at.trunc_subsecs(6),
            attempts: 0,
            verified: false,
        }
    }

    /// Time elapsed since issuance, never negative
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).max(Duration::zero())
    }

    /// Instant at which the record stops being valid
    pub fn expires_at(&self, window: Duration) -> DateTime<Utc> {
        self.created_at + window
    }

    /// Whether the record is past its expiry window at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) >= window
    }

    /// Lifetime left at `now`, clamped to zero
    pub fn remaining_ttl(&self, now: DateTime<Utc>, window: Duration) -> Duration {
        (window - self.age(now)).max(Duration::zero())
    }

    /// Time left before another code may be issued, if still throttled
    pub fn resend_wait(&self, now: DateTime<Utc>, delay: Duration) -> Option<Duration> {
        let age = self.age(now);
        if age < delay {
            Some(delay - age)
        } else {
            None
        }
    }

    /// Whether the attempt budget is spent
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Attempts left before the record becomes unusable
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Consumes one attempt
    pub fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Marks the record as verified
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Compares a provided code in constant time
    pub fn matches(&self, provided: &str) -> bool {
        self.code.len() == provided.len() && constant_time_eq(self.code.as_bytes(), provided.as_bytes())
    }
}
