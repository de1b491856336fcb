//! OTP route handlers
//!
//! - `POST /send-otp` issues a code and emails it
//! - `POST /verify-otp` checks a submitted code

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use otp_core::repositories::OtpRepository;
use otp_core::services::{NotifierTrait, OtpService};

/// Default limit for JSON request bodies (16 KiB)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024;

/// Application state that holds shared services
pub struct AppState<S, N>
where
    S: OtpRepository + ?Sized,
    N: NotifierTrait + ?Sized,
{
    pub otp_service: Arc<OtpService<S, N>>,
    /// Largest accepted JSON body in bytes
    pub max_payload_size: usize,
}

impl<S, N> AppState<S, N>
where
    S: OtpRepository + ?Sized,
    N: NotifierTrait + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<S, N>>) -> Self {
        Self {
            otp_service,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_payload_size(mut self, max_payload_size: usize) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }
}

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;
