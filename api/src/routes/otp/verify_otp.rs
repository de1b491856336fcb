use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::OtpRepository;
use otp_core::services::NotifierTrait;
use otp_shared::utils::email::mask_email;

use crate::dto::otp::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_otp_error, validation_error_response};

use super::AppState;

/// Handler for POST /verify-otp
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "otp": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "OTP valid." }
/// ```
///
/// ## Errors
/// - 400 `invalid_input`, `otp_not_found`, `otp_invalid`, `otp_expired`
/// - 429 `too_many_attempts` when attempt limiting is enabled
/// - 500 `store_error`
pub async fn verify_otp<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpRepository + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(errors = ?errors, "Validation failed for verify_otp request");
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing verify_otp request");

    match state.otp_service.verify_otp(&request.email, &request.otp).await {
        Ok(_verified) => HttpResponse::Ok().json(VerifyOtpResponse {
            message: "OTP valid.".to_string(),
        }),
        Err(error) => handle_otp_error(error),
    }
}
