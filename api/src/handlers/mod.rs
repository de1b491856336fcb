pub mod error;

pub use error::{handle_otp_error, json_error_handler, validation_error_response};
