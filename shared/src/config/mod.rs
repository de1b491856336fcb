//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection used by the Redis code store
//! - `database` - MySQL connection and pool configuration
//! - `email` - Email provider and SMTP relay settings
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Code lifetime, consumption and sweep policy
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use otp::{OtpConfig, StoreBackend, MAX_OTP_TTL_SECONDS};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// OTP policy configuration
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            otp: OtpConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check that the settings required by the selected backends are present
    ///
    /// Returns the list of problems found; an empty list means the
    /// configuration is usable.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.otp.ttl_seconds <= 0 {
            problems.push("OTP_TTL_SECONDS must be positive".to_string());
        } else if self.otp.ttl_seconds > MAX_OTP_TTL_SECONDS {
            problems.push(format!(
                "OTP_TTL_SECONDS must not exceed {} (one day)",
                MAX_OTP_TTL_SECONDS
            ));
        }
        if self.otp.max_failed_attempts == Some(0) {
            problems.push("OTP_MAX_FAILED_ATTEMPTS must be at least 1 when set".to_string());
        }
        if self.otp.store_backend == StoreBackend::Memory && self.environment.is_production() {
            problems.push("in-memory OTP store is not allowed in production".to_string());
        }
        if self.email.provider == EmailProvider::Smtp && !self.email.has_credentials() {
            problems.push("EMAIL_USER and EMAIL_PASS are required for the SMTP provider".to_string());
        }
        if self.email.provider == EmailProvider::Mock && self.environment.is_production() {
            problems.push("mock email provider is not allowed in production".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
