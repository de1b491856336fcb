use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use otp_api::app::create_app;
use otp_api::routes::otp::AppState;
use otp_core::repositories::OtpRepository;
use otp_core::services::{OtpService, OtpServiceConfig};
use otp_infra::MockEmailService;

use crate::common::{create_test_app_state, UnavailableRepository};

#[actix_web::test]
async fn test_send_otp_success() {
    let (state, repository, notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP sent to email.");
    assert_eq!(body["expires_in"], 120);
    // The code only travels by email
    assert!(body.get("otp").is_none());

    let record = repository.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(notifier.last_code_for("a@x.com"), Some(record.code));
}

#[actix_web::test]
async fn test_send_otp_missing_email() {
    let (state, repository, notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    for payload in [json!({}), json!({ "email": "" })] {
        let req = test::TestRequest::post()
            .uri("/send-otp")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["details"]["field"], "email");
    }

    assert!(repository.is_empty().await);
    assert_eq!(notifier.get_message_count(), 0);
}

#[actix_web::test]
async fn test_send_otp_email_too_long() {
    let (state, _repository, notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let email = format!("{}@x.com", "a".repeat(400));
    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
    assert!(body["details"].get("email").is_some());
    assert_eq!(notifier.get_message_count(), 0);
}

#[actix_web::test]
async fn test_send_otp_sweeps_stale_codes() {
    let (state, repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    repository
        .upsert("old@x.com", "111111", Utc::now() - Duration::minutes(5))
        .await
        .unwrap();
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(repository.find_by_email("old@x.com").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_send_otp_store_failure() {
    let notifier = MockEmailService::new();
    let service = Arc::new(OtpService::new(
        Arc::new(UnavailableRepository),
        Arc::new(notifier.clone()),
        OtpServiceConfig::default(),
    ));
    let app = test::init_service(create_app(web::Data::new(AppState::new(service)))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "store_error");
    // Backend details stay out of the response
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
    assert_eq!(notifier.get_message_count(), 0);
}

#[actix_web::test]
async fn test_send_otp_notify_failure() {
    let (_, repository, _) = create_test_app_state(OtpServiceConfig::default());
    let service = Arc::new(OtpService::new(
        repository.clone(),
        Arc::new(MockEmailService::failing()),
        OtpServiceConfig::default(),
    ));
    let app = test::init_service(create_app(web::Data::new(AppState::new(service)))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "notify_error");

    // The stored code is kept
    assert!(repository.find_by_email("a@x.com").await.unwrap().is_some());
}
