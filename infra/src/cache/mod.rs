//! Cache module for Redis-based storage
//!
//! This module provides the Redis client with connection retry logic and
//! the Redis-backed OTP code store.

pub mod otp_repository;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use otp_repository::{OtpKeys, RedisOtpRepository};
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use otp_shared::config::CacheConfig;
