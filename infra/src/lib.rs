//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailOTP service.
//! It provides concrete implementations of the code store and notifier
//! interfaces defined in `otp_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL code store using SQLx
//! - **Cache**: Redis code store
//! - **Email**: SMTP notifier (lettre) and a logging mock
//! - **Store**: backend selection from configuration
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL code store (default)
//! - `redis-cache`: Enable the Redis code store (default)

// Re-export core types for convenience
pub use otp_core::errors::{OtpError, OtpResult};

/// Database module - MySQL code store using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and code store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Email module - Notifier implementations
pub mod email;

/// Store module - Code store selection
pub mod store;

pub use email::{create_notifier, MockEmailService, SmtpNotifier};
pub use store::create_otp_repository;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Handles:
    //! - Database connection strings
    //! - Redis configuration
    //! - SMTP relay settings

    use serde::{Deserialize, Serialize};

    pub use otp_shared::config::{CacheConfig, DatabaseConfig, EmailConfig, OtpConfig};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis cache configuration
        pub cache: CacheConfig,
        /// Email delivery configuration
        pub email: EmailConfig,
        /// OTP policy (selects the store backend)
        pub otp: OtpConfig,
    }

    impl InfrastructureConfig {
        /// Assemble from the application configuration
        pub fn from_app_config(app: &otp_shared::AppConfig) -> Self {
            Self {
                database: app.database.clone(),
                cache: app.cache.clone(),
                email: app.email.clone(),
                otp: app.otp.clone(),
            }
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Serialization of a stored record failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for OtpError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Email(message) => OtpError::Notify(message),
            other => OtpError::Store(other.to_string()),
        }
    }
}
