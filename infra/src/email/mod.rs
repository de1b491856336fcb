//! Email Service Module
//!
//! Notifier implementations for delivering OTP codes:
//!
//! - **SMTP**: Delivery through an SMTP relay using lettre
//! - **Mock**: Structured log output for development and tests
//!
//! Both implement `otp_core::services::NotifierTrait`.

use std::sync::Arc;

use otp_core::services::NotifierTrait;
use otp_shared::config::{EmailConfig, EmailProvider};

pub mod mock_email;
pub mod smtp;

pub use mock_email::{MockEmailService, SentEmail};
pub use smtp::SmtpNotifier;

#[cfg(test)]
mod tests;

/// Create a notifier based on configuration
///
/// # Returns
///
/// The notifier selected by `EMAIL_PROVIDER`, or a configuration error when
/// the SMTP relay cannot be set up.
pub fn create_notifier(
    config: &EmailConfig,
) -> Result<Arc<dyn NotifierTrait>, crate::InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => {
            let notifier = SmtpNotifier::new(config)?;
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "Using SMTP email notifier"
            );
            Ok(Arc::new(notifier))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using mock email notifier; codes are only logged");
            Ok(Arc::new(MockEmailService::new()))
        }
    }
}
