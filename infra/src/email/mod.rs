//! Email Delivery Module
//!
//! Implementations of the verification core's `EmailNotifier`:
//!
//! - **SMTP**: STARTTLS relay via lettre for real delivery
//! - **Log**: writes the message to the log instead of sending it, for
//!   development setups without a mail server
//! - **Security**: addresses are masked in logs

pub mod log_notifier;
pub mod smtp;

#[cfg(test)]
mod tests;

pub use log_notifier::LogEmailNotifier;
pub use smtp::SmtpEmailNotifier;
