//! Shared utilities and common types for the MailOTP server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures and error codes
//! - Email helpers (masking for logs, basic shape checks)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment,
    LoggingConfig, OtpConfig, ServerConfig, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
