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

macro_rules! verify {
    ($app:expr, $payload:expr) => {{
        let req = test::TestRequest::post()
            .uri("/verify-otp")
            .set_json($payload)
            .to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_send_then_verify() {
    let (state, repository, notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let code = notifier.last_code_for("a@x.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": code }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP valid.");

    // Still valid: verification does not consume the code
    let (status, _) = verify!(&app, json!({ "email": "a@x.com", "otp": code }));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": wrong }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_invalid");

    // Three minutes on: wrong code is still reported as incorrect, right code as expired
    repository
        .set_issued_at("a@x.com", Utc::now() - Duration::minutes(3))
        .await;

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": wrong }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_invalid");

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": code }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_expired");
}

#[actix_web::test]
async fn test_verify_unknown_email() {
    let (state, _repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let (status, body) = verify!(&app, json!({ "email": "nobody@x.com", "otp": "123456" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_not_found");
}

#[actix_web::test]
async fn test_verify_missing_fields() {
    let (state, _repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let cases = vec![
        (json!({ "otp": "123456" }), "email"),
        (json!({ "email": "a@x.com" }), "otp"),
        (json!({ "email": "a@x.com", "otp": "" }), "otp"),
    ];

    for (payload, field) in cases {
        let (status, body) = verify!(&app, payload);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["details"]["field"], field);
    }
}

#[actix_web::test]
async fn test_verify_whitespace_code_is_wrong_code() {
    let (state, repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    repository.upsert("a@x.com", "482913", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": "   " }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_invalid");
}

#[actix_web::test]
async fn test_verify_consumes_when_configured() {
    let config = OtpServiceConfig {
        consume_on_success: true,
        ..OtpServiceConfig::default()
    };
    let (state, repository, _notifier) = create_test_app_state(config);
    repository.upsert("a@x.com", "482913", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let (status, _) = verify!(&app, json!({ "email": "a@x.com", "otp": "482913" }));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": "482913" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "otp_not_found");
}

#[actix_web::test]
async fn test_verify_too_many_attempts() {
    let config = OtpServiceConfig {
        max_failed_attempts: Some(2),
        ..OtpServiceConfig::default()
    };
    let (state, repository, _notifier) = create_test_app_state(config);
    repository.upsert("a@x.com", "482913", Utc::now()).await.unwrap();
    let app = test::init_service(create_app(web::Data::new(state))).await;

    for _ in 0..2 {
        let (status, _) = verify!(&app, json!({ "email": "a@x.com", "otp": "000000" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": "482913" }));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "too_many_attempts");
    assert_eq!(body["details"]["max_attempts"], 2);
}

#[actix_web::test]
async fn test_verify_store_failure() {
    let service = Arc::new(OtpService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MockEmailService::new()),
        OtpServiceConfig::default(),
    ));
    let app = test::init_service(create_app(web::Data::new(AppState::new(service)))).await;

    let (status, body) = verify!(&app, json!({ "email": "a@x.com", "otp": "123456" }));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_error");
}
