//! Error taxonomy for the OTP lifecycle.
//!
//! Every variant is terminal for the operation that produced it; nothing is
//! retried internally. Only `Store` and `Notify` are server-side failures,
//! the rest can be corrected by the caller (fix the input or request a new
//! code).

use thiserror::Error;


/// Errors returned by OTP issuance and verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A required field was missing or empty
    #[error("Missing required field: {field}")]
    InvalidInput { field: String },

    /// No record exists for the email (never requested or already swept)
    #[error("OTP not found")]
    NotFound,

    /// The submitted code does not match the stored one
    #[error("OTP is incorrect")]
    Invalid,

    /// The code matched but is older than the TTL
    #[error("OTP has expired")]
    Expired,

    /// Verification is locked until a new code is issued
    #[error("Too many failed attempts (limit {max_attempts})")]
    TooManyAttempts { max_attempts: u32 },

    /// The code store failed
    #[error("Store error: {0}")]
    Store(String),

    /// The notifier failed to deliver the code
    #[error("Notify error: {0}")]
    Notify(String),
}

impl OtpError {
    /// Shorthand for a missing field
    pub fn missing(field: &str) -> Self {
        OtpError::InvalidInput {
            field: field.to_string(),
        }
    }

    /// Whether the failure is on the server side rather than the caller's
    pub fn is_server_error(&self) -> bool {
        matches!(self, OtpError::Store(_) | OtpError::Notify(_))
    }
}

pub type OtpResult<T> = Result<T, OtpError>;
