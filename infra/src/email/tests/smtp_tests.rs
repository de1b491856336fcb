//! Tests for the SMTP notifier

use lettre::message::header::ContentType;

use otp_shared::config::EmailConfig;

use crate::email::SmtpNotifier;
use crate::InfrastructureError;

fn config() -> EmailConfig {
    EmailConfig {
        username: "noreply@example.com".to_string(),
        password: "app-password".to_string(),
        ..EmailConfig::default()
    }
}

#[tokio::test]
async fn test_requires_credentials() {
    let result = SmtpNotifier::new(&EmailConfig::default());
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_build_message() {
    let notifier = SmtpNotifier::new(&config()).unwrap();

    let (message, message_id) = notifier
        .build_message("a@x.com", "Your OTP Code", "Your OTP code is 482913.")
        .unwrap();

    assert!(message_id.starts_with('<'));
    assert!(message_id.ends_with("@smtp.gmail.com>"));

    let headers = message.headers();
    assert_eq!(headers.get::<ContentType>(), Some(ContentType::TEXT_PLAIN));

    let formatted = String::from_utf8(message.formatted()).unwrap();
    assert!(formatted.contains("From: MailOTP <noreply@example.com>"));
    assert!(formatted.contains("To: a@x.com"));
    assert!(formatted.contains("Subject: Your OTP Code"));
    assert!(formatted.contains("Your OTP code is 482913."));
}

#[tokio::test]
async fn test_invalid_recipient() {
    let notifier = SmtpNotifier::new(&config()).unwrap();

    let result = notifier.build_message("not an address", "s", "b");
    assert!(matches!(result, Err(InfrastructureError::Email(_))));
}

#[tokio::test]
async fn test_starttls_port() {
    let config = EmailConfig {
        smtp_port: 587,
        ..config()
    };
    assert!(SmtpNotifier::new(&config).is_ok());
}
