//! In-memory implementation of OtpRepository
//!
//! Used for development and tests. Records live only as long as the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::OtpResult;

use super::r#trait::OtpRepository;

/// In-memory OTP repository
#[derive(Clone)]
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Overwrite the issue time of an existing record
    ///
    /// Returns `false` when no record exists for `email`. Lets callers
    /// simulate elapsed time without waiting.
    pub async fn set_issued_at(&self, email: &str, issued_at: DateTime<Utc>) -> bool {
        match self.records.write().await.get_mut(email) {
            Some(record) => {
                record.issued_at = issued_at;
                true
            }
            None => false,
        }
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn upsert(&self, email: &str, code: &str, issued_at: DateTime<Utc>) -> OtpResult<()> {
        self.records
            .write()
            .await
            .insert(email.to_string(), OtpRecord::new(email, code, issued_at));
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> OtpResult<Option<OtpRecord>> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> OtpResult<u64> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| record.issued_at >= cutoff);

        Ok((initial_count - records.len()) as u64)
    }

    async fn delete(&self, email: &str) -> OtpResult<bool> {
        Ok(self.records.write().await.remove(email).is_some())
    }
}
