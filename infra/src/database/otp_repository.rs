//! MySQL OTP repository
//!
//! Stores one row per email in the `otps` table. The email column uses a
//! binary collation so lookups are exact, case included.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error, info};

use otp_core::domain::entities::otp_record::OtpRecord;
use otp_core::errors::{OtpError, OtpResult};
use otp_core::repositories::OtpRepository;
use otp_shared::utils::email::mask_email;

use crate::InfrastructureError;

pub(crate) const CREATE_OTPS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS otps (
        email VARCHAR(320) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        otp CHAR(6) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        PRIMARY KEY (email),
        INDEX idx_otps_created_at (created_at)
    )
"#;

pub(crate) const UPSERT_OTP: &str = r#"
    INSERT INTO otps (email, otp, created_at)
    VALUES (?, ?, ?)
    ON DUPLICATE KEY UPDATE otp = VALUES(otp), created_at = VALUES(created_at)
"#;

pub(crate) const SELECT_OTP: &str = "SELECT email, otp, created_at FROM otps WHERE email = ?";

pub(crate) const DELETE_OLDER_THAN: &str = "DELETE FROM otps WHERE created_at < ?";

pub(crate) const DELETE_OTP: &str = "DELETE FROM otps WHERE email = ?";

/// MySQL-backed code store
#[derive(Clone)]
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpRepository {
    /// Create a new OTP repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Create the `otps` table if it does not exist
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        info!("Ensuring otps table exists");
        sqlx::query(CREATE_OTPS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create otps table");
                InfrastructureError::Database(e)
            })?;
        Ok(())
    }

    fn store_error(operation: &str, e: sqlx::Error) -> OtpError {
        OtpError::Store(format!("Failed to {} OTP in database: {}", operation, e))
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn upsert(&self, email: &str, code: &str, issued_at: DateTime<Utc>) -> OtpResult<()> {
        sqlx::query(UPSERT_OTP)
            .bind(email)
            .bind(code)
            .bind(issued_at.naive_utc())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to store OTP in database"
                );
                Self::store_error("store", e)
            })?;

        debug!(email = %mask_email(email), "Stored OTP in database");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> OtpResult<Option<OtpRecord>> {
        let row = sqlx::query(SELECT_OTP)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to retrieve OTP from database"
                );
                Self::store_error("retrieve", e)
            })?;

        let Some(row) = row else {
            debug!(email = %mask_email(email), "No OTP found in database");
            return Ok(None);
        };

        let stored_email: String = row
            .try_get("email")
            .map_err(|e| Self::store_error("decode", e))?;
        let code: String = row
            .try_get("otp")
            .map_err(|e| Self::store_error("decode", e))?;
        let created_at: NaiveDateTime = row
            .try_get("created_at")
            .map_err(|e| Self::store_error("decode", e))?;

        Ok(Some(OtpRecord::new(
            stored_email,
            code,
            Utc.from_utc_datetime(&created_at),
        )))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> OtpResult<u64> {
        let result = sqlx::query(DELETE_OLDER_THAN)
            .bind(cutoff.naive_utc())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete stale OTPs from database");
                Self::store_error("delete stale", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, email: &str) -> OtpResult<bool> {
        let result = sqlx::query(DELETE_OTP)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to delete OTP from database"
                );
                Self::store_error("delete", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
