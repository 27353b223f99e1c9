//! Verification service module for email one-time codes
//!
//! This module provides the complete code workflow:
//! - CSPRNG code generation
//! - Issuance with resend throttling and delivery rollback
//! - Verification with attempt tracking and exhaustion
//! - Per-address serialization of concurrent requests

mod code_generator;
mod config;
mod locks;
mod service;
mod template;
mod traits;
mod types;


pub use code_generator::SecureCodeGenerator;
pub use config::{VerificationServiceConfig, DEFAULT_MAX_CONFLICT_RETRIES};
pub use locks::{KeyGuard, KeyedLocks};
pub use service::VerificationService;
pub use template::{render_otp_email, OTP_EMAIL_SUBJECT};
pub use traits::{CodeGenerator, EmailNotifier};
pub use types::{SendCodeResult, VerifyCodeResult};
