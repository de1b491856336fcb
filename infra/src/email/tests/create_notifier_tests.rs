//! Tests for notifier selection

use otp_shared::config::{EmailConfig, EmailProvider};

use crate::email::create_notifier;

#[tokio::test]
async fn test_mock_provider() {
    let config = EmailConfig {
        provider: EmailProvider::Mock,
        ..EmailConfig::default()
    };

    let notifier = create_notifier(&config).unwrap();
    let message_id = notifier.send("a@x.com", "s", "b").await.unwrap();
    assert!(message_id.starts_with("mock-msg-"));
}

#[tokio::test]
async fn test_smtp_provider_without_credentials() {
    let config = EmailConfig {
        provider: EmailProvider::Smtp,
        ..EmailConfig::default()
    };

    assert!(create_notifier(&config).is_err());
}
