//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL-backed OTP code store
//! - Schema creation for the `otps` table

pub mod connection;
pub mod otp_repository;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use otp_repository::MySqlOtpRepository;
