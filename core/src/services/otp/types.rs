//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Confirmation of a successful issuance
///
/// Carries no code value; the code only ever leaves through the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedOtp {
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the notifier
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedOtp {
    pub email: String,
    pub issued_at: DateTime<Utc>,
    /// Whether the record was deleted as part of verification
    pub consumed: bool,
}
