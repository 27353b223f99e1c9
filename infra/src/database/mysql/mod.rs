//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod otp_repository_impl;

// Re-export the MySQL implementations
pub use otp_repository_impl::MySqlOtpRepository;
