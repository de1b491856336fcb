//! Conversion of failures into JSON error responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use otp_core::errors::OtpError;
use otp_shared::errors::{error_codes, ErrorResponse};

/// Message returned for every server-side failure; details go to the log only
pub const SERVER_ERROR_MESSAGE: &str = "A server error occurred. Please try again later.";

/// Status code for an OTP error
pub fn status_for(error: &OtpError) -> StatusCode {
    match error {
        OtpError::InvalidInput { .. }
        | OtpError::NotFound
        | OtpError::Invalid
        | OtpError::Expired => StatusCode::BAD_REQUEST,
        OtpError::TooManyAttempts { .. } => StatusCode::TOO_MANY_REQUESTS,
        OtpError::Store(_) | OtpError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle OTP errors and convert them to appropriate HTTP responses
pub fn handle_otp_error(error: OtpError) -> HttpResponse {
    let status = status_for(&error);

    let body = match &error {
        OtpError::InvalidInput { field } => {
            tracing::debug!(field = %field, "Rejected request with missing field");
            ErrorResponse::new(error_codes::INVALID_INPUT, error.to_string())
                .add_detail("field", field)
        }
        OtpError::NotFound => ErrorResponse::new(error_codes::OTP_NOT_FOUND, error.to_string()),
        OtpError::Invalid => ErrorResponse::new(error_codes::OTP_INVALID, error.to_string()),
        OtpError::Expired => ErrorResponse::new(error_codes::OTP_EXPIRED, error.to_string()),
        OtpError::TooManyAttempts { max_attempts } => {
            ErrorResponse::new(error_codes::TOO_MANY_ATTEMPTS, error.to_string())
                .add_detail("max_attempts", max_attempts)
        }
        OtpError::Store(message) => {
            tracing::error!(error = %message, "Code store failure");
            ErrorResponse::new(error_codes::STORE_ERROR, SERVER_ERROR_MESSAGE)
        }
        OtpError::Notify(message) => {
            tracing::error!(error = %message, "Notifier failure");
            ErrorResponse::new(error_codes::NOTIFY_ERROR, SERVER_ERROR_MESSAGE)
        }
    };

    HttpResponse::build(status).json(body)
}

/// 400 response listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::INVALID_INPUT, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// JSON extractor error handler: malformed bodies become 400 `invalid_input`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");

    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let response = HttpResponse::build(status).json(ErrorResponse::new(
        error_codes::INVALID_INPUT,
        format!("Invalid JSON body: {}", err),
    ));

    InternalError::from_response(err, response).into()
}
