pub mod otp;

pub use otp::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
pub use otp_shared::errors::ErrorResponse;
