//! Unit tests for OTP service configuration

use otp_shared::config::OtpConfig;

use crate::services::otp::OtpServiceConfig;

#[test]
fn test_default_config() {
    let config = OtpServiceConfig::default();
    assert_eq!(config.ttl_seconds, 120);
    assert!(!config.consume_on_success);
    assert!(config.max_failed_attempts.is_none());
    assert_eq!(config.ttl().num_seconds(), 120);
}

#[test]
fn test_from_config() {
    let otp = OtpConfig {
        ttl_seconds: 300,
        consume_on_success: true,
        max_failed_attempts: Some(5),
        ..OtpConfig::default()
    };

    let config = OtpServiceConfig::from_config(&otp, "Verify your email");
    assert_eq!(config.ttl_seconds, 300);
    assert!(config.consume_on_success);
    assert_eq!(config.max_failed_attempts, Some(5));
    assert_eq!(config.email_subject, "Verify your email");
}

#[test]
fn test_from_config_clamps_ttl() {
    let huge = OtpConfig {
        ttl_seconds: i64::MAX,
        ..OtpConfig::default()
    };
    let config = OtpServiceConfig::from_config(&huge, "Your OTP Code");
    assert_eq!(config.ttl_seconds, 86_400);
    assert_eq!(config.ttl(), chrono::Duration::days(1));

    let negative = OtpConfig {
        ttl_seconds: -5,
        ..OtpConfig::default()
    };
    assert_eq!(OtpServiceConfig::from_config(&negative, "Your OTP Code").ttl_seconds, 1);
}

#[test]
fn test_validity_label() {
    let cases = vec![(120, "2 minutes"), (60, "1 minute"), (90, "90 seconds"), (1, "1 second")];

    for (ttl_seconds, expected) in cases {
        let config = OtpServiceConfig {
            ttl_seconds,
            ..OtpServiceConfig::default()
        };
        assert_eq!(config.validity_label(), expected, "ttl {}", ttl_seconds);
    }
}

#[test]
fn test_message_body_states_code_and_window() {
    let config = OtpServiceConfig::default();
    assert_eq!(
        config.message_body("482913"),
        "Your OTP code is 482913. It is valid for 2 minutes."
    );
}
