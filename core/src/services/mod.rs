//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    AttemptTracker, IssuedOtp, NotifierTrait, OtpService, OtpServiceConfig, OtpSweeper,
    OtpSweeperConfig, SweepResult, VerifiedOtp,
};
