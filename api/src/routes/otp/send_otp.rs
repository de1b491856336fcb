use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::OtpRepository;
use otp_core::services::NotifierTrait;
use otp_shared::utils::email::mask_email;

use crate::dto::otp::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::{handle_otp_error, validation_error_response};

use super::AppState;

/// Handler for POST /send-otp
///
/// Issues a new code for the email, replacing any earlier one, and sends it.
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "OTP sent to email.", "expires_in": 120 }
/// ```
///
/// ## Errors
/// - 400 `invalid_input` when the email is missing or empty
/// - 500 `store_error` / `notify_error` when the store or relay fails
pub async fn send_otp<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpRepository + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(errors = ?errors, "Validation failed for send_otp request");
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing send_otp request");

    match state.otp_service.request_otp(&request.email).await {
        Ok(_issued) => HttpResponse::Ok().json(SendOtpResponse {
            message: "OTP sent to email.".to_string(),
            expires_in: state.otp_service.config().ttl_seconds,
        }),
        Err(error) => handle_otp_error(error),
    }
}
