//! SMTP notifier using lettre
//!
//! Port 465 uses implicit TLS; any other port upgrades with STARTTLS.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use otp_core::services::NotifierTrait;
use otp_shared::config::EmailConfig;
use otp_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Port for SMTP over implicit TLS
const SMTPS_PORT: u16 = 465;

/// Email notifier backed by an SMTP relay
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    host: String,
}

impl SmtpNotifier {
    /// Build the relay transport from configuration
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "EMAIL_USER and EMAIL_PASS are required for SMTP".to_string(),
            ));
        }

        let builder = if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e)))?;

        let transport = builder
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        Ok(Self {
            transport,
            from: config.from_mailbox(),
            host: config.smtp_host.clone(),
        })
    }

    /// Build the plain-text message with a generated Message-ID
    pub(crate) fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(Message, String), InfrastructureError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.host);

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| InfrastructureError::Email(format!("Invalid from address: {}", e)))?,
            )
            .to(recipient
                .parse()
                .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))?;

        Ok((message, message_id))
    }

    /// Send a plain-text email, returning its Message-ID
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let (message, message_id) = self.build_message(recipient, subject, body)?;

        self.transport.send(message).await.map_err(|e| {
            error!(
                provider = "smtp",
                email = %mask_email(recipient),
                error = %e,
                "Failed to send email"
            );
            InfrastructureError::Email(format!("Failed to send email: {}", e))
        })?;

        info!(
            provider = "smtp",
            email = %mask_email(recipient),
            message_id = %message_id,
            "Email sent"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl NotifierTrait for SmtpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        self.send_email(recipient, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
