//! OTP repository trait defining the interface for code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::OtpResult;

/// Repository trait for OtpRecord persistence, keyed by email
///
/// Implementations report every backend failure as `OtpError::Store`.
/// A missing record is `Ok(None)`, never an error.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert or replace the record for `email`
    ///
    /// # Arguments
    /// * `email` - Record key, matched exactly
    /// * `code` - The 6-digit code
    /// * `issued_at` - Issue timestamp
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use otp_core::repositories::OtpRepository;
    /// # async fn example(repo: &impl OtpRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// repo.upsert("a@x.com", "482913", Utc::now()).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn upsert(&self, email: &str, code: &str, issued_at: DateTime<Utc>) -> OtpResult<()>;

    /// Point lookup by email
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Record found (possibly expired)
    /// * `Ok(None)` - No record for this email
    /// * `Err(OtpError::Store)` - Backend failure
    async fn find_by_email(&self, email: &str) -> OtpResult<Option<OtpRecord>>;

    /// Delete every record issued strictly before `cutoff`
    ///
    /// # Returns
    /// The number of records removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> OtpResult<u64>;

    /// Delete the record for `email`
    ///
    /// # Returns
    /// `true` if a record was removed
    async fn delete(&self, email: &str) -> OtpResult<bool>;
}
