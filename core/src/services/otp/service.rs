//! Main OTP service implementation

use chrono::Utc;
use std::sync::Arc;
use otp_shared::utils::email::mask_email;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{OtpError, OtpResult};
use crate::repositories::OtpRepository;

use super::attempts::AttemptTracker;
use super::config::OtpServiceConfig;
use super::traits::NotifierTrait;
use super::types::{IssuedOtp, VerifiedOtp};

/// OTP lifecycle service: issues codes by email and verifies them
///
/// The store and notifier are injected at construction; the service keeps
/// no other shared state apart from the optional attempt tracker.
pub struct OtpService<S: OtpRepository + ?Sized, N: NotifierTrait + ?Sized> {
    /// Code store
    repository: Arc<S>,
    /// Outbound email channel
    notifier: Arc<N>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Failed verification counter
    attempts: AttemptTracker,
}

impl<S: OtpRepository + ?Sized, N: NotifierTrait + ?Sized> OtpService<S, N> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `repository` - Code store implementation
    /// * `notifier` - Notifier implementation
    /// * `config` - Service configuration
    pub fn new(repository: Arc<S>, notifier: Arc<N>, config: OtpServiceConfig) -> Self {
        let attempts = AttemptTracker::new(config.max_failed_attempts);
        Self {
            repository,
            notifier,
            config,
            attempts,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a fresh code for `email` and send it
    ///
    /// This method:
    /// 1. Rejects an empty email
    /// 2. Sweeps stale records (best effort)
    /// 3. Generates a new code with the OS CSPRNG
    /// 4. Upserts it, replacing any earlier code for the email
    /// 5. Sends it through the notifier
    ///
    /// A store failure stops before anything is sent. A notify failure
    /// leaves the stored record in place.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedOtp)` - Confirmation without the code value
    /// * `Err(OtpError)` - `InvalidInput`, `Store` or `Notify`
    pub async fn request_otp(&self, email: &str) -> OtpResult<IssuedOtp> {
        if email.trim().is_empty() {
            return Err(OtpError::missing("email"));
        }

        let masked = mask_email(email);

        if let Err(e) = self.sweep_expired().await {
            tracing::warn!(
                error = %e,
                event = "otp_sweep_failed",
                "Request-time sweep failed, continuing with issuance"
            );
        }

        let now = Utc::now();
        let record = OtpRecord::issue(email, now);

        self.repository
            .upsert(&record.email, &record.code, record.issued_at)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                e
            })?;

        tracing::info!(
            email = %masked,
            event = "otp_generated",
            "Stored new OTP"
        );

        self.attempts.reset(email).await;

        let body = self.config.message_body(&record.code);
        let message_id = self
            .notifier
            .send(email, &self.config.email_subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send OTP email"
                );
                OtpError::Notify(e)
            })?;

        tracing::info!(
            email = %masked,
            message_id = %message_id,
            event = "otp_sent",
            "OTP email sent"
        );

        Ok(IssuedOtp {
            email: record.email.clone(),
            issued_at: record.issued_at,
            expires_at: record.expires_at(self.config.ttl()),
            message_id,
        })
    }

    /// Check a submitted code against the stored record
    ///
    /// Outcomes are evaluated in a fixed order: missing input, lockout,
    /// missing record, mismatch, expiry. A wrong code is reported as
    /// `Invalid` even when the record has also expired. Only empty fields
    /// count as missing; whitespace is compared like any other input.
    ///
    /// With an attempt limit, an attempt is reserved before the lookup and
    /// kept only when the code is wrong.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedOtp)` - The code matched and is within its TTL
    /// * `Err(OtpError)` - `InvalidInput`, `TooManyAttempts`, `NotFound`,
    ///   `Invalid`, `Expired` or `Store`
    pub async fn verify_otp(&self, email: &str, code: &str) -> OtpResult<VerifiedOtp> {
        if email.is_empty() {
            return Err(OtpError::missing("email"));
        }
        if code.is_empty() {
            return Err(OtpError::missing("otp"));
        }

        let masked = mask_email(email);

        if let Err(max_attempts) = self.attempts.try_reserve(email).await {
            tracing::warn!(
                email = %masked,
                max_attempts = max_attempts,
                event = "otp_locked",
                "Verification blocked after too many failed attempts"
            );
            return Err(OtpError::TooManyAttempts { max_attempts });
        }

        match self.check_code(email, code, &masked).await {
            Ok(verified) => Ok(verified),
            Err(OtpError::Invalid) => {
                let failures = self.attempts.failures(email).await;
                tracing::warn!(
                    email = %masked,
                    failures = failures,
                    event = "otp_mismatch",
                    "Submitted OTP does not match"
                );
                Err(OtpError::Invalid)
            }
            Err(e) => {
                self.attempts.release(email).await;
                Err(e)
            }
        }
    }

    async fn check_code(&self, email: &str, code: &str, masked: &str) -> OtpResult<VerifiedOtp> {
        let record = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::info!(email = %masked, event = "otp_not_found", "No OTP on record");
                OtpError::NotFound
            })?;

        if !record.matches(code) {
            return Err(OtpError::Invalid);
        }

        let now = Utc::now();
        if record.is_expired_at(now, self.config.ttl()) {
            tracing::info!(
                email = %masked,
                age_seconds = record.age(now).num_seconds(),
                event = "otp_expired",
                "Submitted OTP has expired"
            );
            return Err(OtpError::Expired);
        }

        self.attempts.reset(email).await;

        let consumed = if self.config.consume_on_success {
            self.repository.delete(email).await?
        } else {
            false
        };

        tracing::info!(
            email = %masked,
            consumed = consumed,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(VerifiedOtp {
            email: record.email,
            issued_at: record.issued_at,
            consumed,
        })
    }

    /// Delete every record older than the TTL
    ///
    /// Attempt counters last touched before the same cutoff are dropped too.
    ///
    /// # Returns
    /// The number of records removed
    pub async fn sweep_expired(&self) -> OtpResult<u64> {
        let cutoff = Utc::now() - self.config.ttl();
        let deleted = self.repository.delete_older_than(cutoff).await?;
        let pruned = self.attempts.prune_older_than(cutoff).await;
        if deleted > 0 || pruned > 0 {
            tracing::debug!(
                deleted = deleted,
                pruned_counters = pruned,
                event = "otp_swept",
                "Swept stale OTPs"
            );
        }
        Ok(deleted)
    }
}
