//! OTP service module for email-based verification
//!
//! This module provides the complete one-time passcode lifecycle:
//! - Code generation and storage (one live code per email)
//! - Delivery through an injected notifier
//! - Verification with mismatch reported before expiry
//! - Age-based sweeping of stale codes, on request and in the background
//! - Optional failed-attempt limiting

mod attempts;
mod config;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use attempts::AttemptTracker;
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use sweeper::{OtpSweeper, OtpSweeperConfig, SweepResult};
pub use traits::NotifierTrait;
pub use types::{IssuedOtp, VerifiedOtp};
