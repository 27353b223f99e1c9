//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CodeGenerator, EmailNotifier, KeyedLocks, SecureCodeGenerator, SendCodeResult,
    VerificationService, VerificationServiceConfig, VerifyCodeResult, OTP_EMAIL_SUBJECT,
};
