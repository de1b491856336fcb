//! # MailOTP Core
//!
//! Core business logic and domain layer for the MailOTP backend.
//! This crate contains the OTP record entity, the OTP lifecycle service,
//! the code store interface with an in-memory implementation, and the
//! error taxonomy shared by every layer above it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_TTL_SECONDS};
pub use errors::{OtpError, OtpResult};
pub use repositories::{InMemoryOtpRepository, OtpRepository};
pub use services::{
    AttemptTracker, IssuedOtp, NotifierTrait, OtpService, OtpServiceConfig, OtpSweeper,
    OtpSweeperConfig, SweepResult, VerifiedOtp,
};
