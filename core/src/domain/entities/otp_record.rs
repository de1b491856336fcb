//! OTP record entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the one-time passcode
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default lifetime of a code (2 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 120;

/// The single live passcode for an email address
///
/// A new issuance for the same email replaces `code` and `issued_at`.
/// Verification only reads the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Email address the code was sent to, matched exactly
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// When the code was issued or last regenerated
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record from its parts
    pub fn new(email: impl Into<String>, code: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            issued_at,
        }
    }

    /// Issues a record with a freshly generated code
    pub fn issue(email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self::new(email, Self::generate_code(), issued_at)
    }

    /// Generates a uniformly random code in `[100000, 999999]`
    ///
    /// Uses `OsRng`, the OS-provided CSPRNG, so codes cannot be predicted
    /// from earlier ones.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether `code` has the issued shape: exactly six ASCII digits
    pub fn is_well_formed_code(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Time elapsed since issuance
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// When the code stops being accepted
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.issued_at + ttl
    }

    /// Expired once strictly more than `ttl` has elapsed
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) > ttl
    }

    /// Exact string comparison of the submitted code, in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}
