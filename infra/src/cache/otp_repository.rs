//! Redis OTP repository
//!
//! Each record is a JSON string at `{prefix}:record:{email}`. A sorted set at
//! `{prefix}:issued` scores every email by its issue time in milliseconds so
//! that stale records can be removed by range. Records carry no Redis TTL:
//! an expired code must still be found so verification can report it as
//! expired.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Script};
use tracing::{debug, error};

use otp_core::domain::entities::otp_record::OtpRecord;
use otp_core::errors::{OtpError, OtpResult};
use otp_core::repositories::OtpRepository;
use otp_shared::utils::email::mask_email;

use super::redis_client::RedisClient;

// KEYS[1] = index, ARGV[1] = exclusive max score, ARGV[2] = record key prefix
const DELETE_OLDER_THAN_SCRIPT: &str = r#"
local emails = redis.call('ZRANGEBYSCORE', KEYS[1], '-inf', '(' .. ARGV[1])
for _, email in ipairs(emails) do
    redis.call('DEL', ARGV[2] .. email)
    redis.call('ZREM', KEYS[1], email)
end
return #emails
"#;

/// Key layout for OTP records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpKeys {
    prefix: String,
}

impl OtpKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix shared by all record keys, e.g. `otp:record:`
    pub fn record_prefix(&self) -> String {
        format!("{}:record:", self.prefix)
    }

    /// Key holding the record for `email`
    pub fn record(&self, email: &str) -> String {
        format!("{}{}", self.record_prefix(), email)
    }

    /// Sorted set of emails scored by issue time
    pub fn index(&self) -> String {
        format!("{}:issued", self.prefix)
    }
}

/// Redis-backed code store
#[derive(Clone)]
pub struct RedisOtpRepository {
    client: RedisClient,
    keys: OtpKeys,
}

impl RedisOtpRepository {
    /// Create a repository using the client's configured key prefix
    pub fn new(client: RedisClient) -> Self {
        let keys = OtpKeys::new(client.key_prefix());
        Self { client, keys }
    }

    pub fn keys(&self) -> &OtpKeys {
        &self.keys
    }

    fn store_error(operation: &str, e: impl std::fmt::Display) -> OtpError {
        OtpError::Store(format!("Failed to {} OTP in Redis: {}", operation, e))
    }
}

#[async_trait]
impl OtpRepository for RedisOtpRepository {
    async fn upsert(&self, email: &str, code: &str, issued_at: DateTime<Utc>) -> OtpResult<()> {
        let record = OtpRecord::new(email, code, issued_at);
        let json = serde_json::to_string(&record).map_err(|e| Self::store_error("serialize", e))?;
        let mut conn = self.client.connection();

        redis::pipe()
            .atomic()
            .set(self.keys.record(email), json)
            .ignore()
            .zadd(self.keys.index(), email, issued_at.timestamp_millis())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to store OTP in Redis"
                );
                Self::store_error("store", e)
            })?;

        debug!(email = %mask_email(email), "Stored OTP in Redis");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> OtpResult<Option<OtpRecord>> {
        let mut conn = self.client.connection();
        let json: Option<String> = conn.get(self.keys.record(email)).await.map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to retrieve OTP from Redis"
            );
            Self::store_error("retrieve", e)
        })?;

        match json {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| Self::store_error("deserialize", e)),
            None => Ok(None),
        }
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> OtpResult<u64> {
        let mut conn = self.client.connection();
        let deleted: u64 = Script::new(DELETE_OLDER_THAN_SCRIPT)
            .key(self.keys.index())
            .arg(cutoff.timestamp_millis())
            .arg(self.keys.record_prefix())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete stale OTPs from Redis");
                Self::store_error("delete stale", e)
            })?;

        Ok(deleted)
    }

    async fn delete(&self, email: &str) -> OtpResult<bool> {
        let mut conn = self.client.connection();
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .del(self.keys.record(email))
            .zrem(self.keys.index(), email)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to delete OTP from Redis"
                );
                Self::store_error("delete", e)
            })?;

        Ok(removed > 0)
    }
}
