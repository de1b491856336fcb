//! Application factory
//!
//! Builds the Actix-web application around an `AppState`. Request tracing
//! middleware is added by the caller so the returned app keeps a plain body
//! type for tests.

use actix_web::{web, App, HttpResponse};

use otp_core::repositories::OtpRepository;
use otp_core::services::NotifierTrait;
use otp_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::routes::otp::{send_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, N>(
    app_state: web::Data<AppState<S, N>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpRepository + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(app_state.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // OTP routes
        .route("/send-otp", web::post().to(send_otp::<S, N>))
        .route("/verify-otp", web::post().to(verify_otp::<S, N>))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mail-otp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
