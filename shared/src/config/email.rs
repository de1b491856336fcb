//! Email delivery configuration module

use serde::{Deserialize, Serialize};

/// Which notifier implementation delivers OTP emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real delivery through an SMTP relay
    Smtp,
    /// Log-only delivery for development and tests
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" | "gmail" => Ok(EmailProvider::Smtp),
            "mock" | "log" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP relay and message settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (465 = implicit TLS)
    pub smtp_port: u16,

    /// SMTP username, also used as the sender address
    pub username: String,

    /// SMTP password or app password
    #[serde(skip_serializing)]
    pub password: String,

    /// Display name on the From header
    pub from_name: String,

    /// Subject line of OTP emails
    pub subject: String,

    /// Transport timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Smtp,
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            from_name: String::from("MailOTP"),
            subject: String::from("Your OTP Code"),
            timeout_seconds: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// `EMAIL_USER` and `EMAIL_PASS` hold the relay credentials.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.provider);
        let smtp_port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "465".to_string())
            .parse()
            .unwrap_or(465);
        let timeout_seconds = std::env::var("SMTP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Self {
            provider,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port,
            username: std::env::var("EMAIL_USER").unwrap_or_default(),
            password: std::env::var("EMAIL_PASS").unwrap_or_default(),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            subject: std::env::var("OTP_EMAIL_SUBJECT").unwrap_or(defaults.subject),
            timeout_seconds,
        }
    }

    /// Whether both relay credentials are set
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Mailbox string for the From header, e.g. `MailOTP <noreply@example.com>`
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.username)
    }
}
