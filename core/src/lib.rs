//! # MailCode Core
//!
//! Core business logic and domain layer for email one-time code verification.
//! This crate contains the code record entity, the verification service, the
//! storage repository interface, and the domain error types.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
