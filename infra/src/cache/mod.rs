//! Cache module for Redis-based code storage
//!
//! This module provides the Redis client with retry logic and the ephemeral
//! implementation of the code repository built on top of it.

pub mod otp_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use otp_cache::{RedisOtpRepository, OTP_KEY_NAMESPACE};
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ev_shared::config::CacheConfig;
