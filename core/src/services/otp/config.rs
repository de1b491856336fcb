//! Configuration for the OTP service

use chrono::Duration;
use otp_shared::config::{OtpConfig, MAX_OTP_TTL_SECONDS};

use crate::domain::entities::otp_record::DEFAULT_TTL_SECONDS;

/// Default subject line for OTP emails
pub const DEFAULT_EMAIL_SUBJECT: &str = "Your OTP Code";

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds a code stays valid after issuance
    pub ttl_seconds: i64,
    /// Delete the record after a successful verification
    pub consume_on_success: bool,
    /// Failed verifications allowed before lockout (None disables the limit)
    pub max_failed_attempts: Option<u32>,
    /// Subject line of the notification email
    pub email_subject: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            consume_on_success: false,
            max_failed_attempts: None,
            email_subject: DEFAULT_EMAIL_SUBJECT.to_string(),
        }
    }
}

impl OtpServiceConfig {
    /// Build from the application-level OTP settings
    ///
    /// The TTL is clamped to `1..=MAX_OTP_TTL_SECONDS`.
    pub fn from_config(otp: &OtpConfig, email_subject: impl Into<String>) -> Self {
        Self {
            ttl_seconds: otp.ttl_seconds.clamp(1, MAX_OTP_TTL_SECONDS),
            consume_on_success: otp.consume_on_success,
            max_failed_attempts: otp.max_failed_attempts,
            email_subject: email_subject.into(),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds)
    }

    /// Validity window rendered for humans, e.g. "2 minutes" or "90 seconds"
    pub fn validity_label(&self) -> String {
        let secs = self.ttl_seconds;
        if secs % 60 == 0 {
            match secs / 60 {
                1 => "1 minute".to_string(),
                n => format!("{} minutes", n),
            }
        } else if secs == 1 {
            "1 second".to_string()
        } else {
            format!("{} seconds", secs)
        }
    }

    /// Plain-text email body carrying the code
    pub fn message_body(&self, code: &str) -> String {
        format!(
            "Your OTP code is {}. It is valid for {}.",
            code,
            self.validity_label()
        )
    }
}
