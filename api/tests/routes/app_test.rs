use actix_web::{http::StatusCode, test, web};
use serde_json::Value;

use otp_api::app::create_app;
use otp_core::services::OtpServiceConfig;

use crate::common::create_test_app_state;

#[actix_web::test]
async fn test_health_check() {
    let (state, _repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_returns_json_404() {
    let (state, _repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_malformed_json_is_invalid_input() {
    let (state, _repository, notifier) = create_test_app_state(OtpServiceConfig::default());
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/send-otp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(notifier.get_message_count(), 0);
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let (state, _repository, _notifier) = create_test_app_state(OtpServiceConfig::default());
    let state = state.with_max_payload_size(64);
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let email = format!("{}@x.com", "a".repeat(100));
    let req = test::TestRequest::post()
        .uri("/send-otp")
        .set_json(serde_json::json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
