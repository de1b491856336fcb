//! Failed verification attempt tracking

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct AttemptEntry {
    count: u32,
    last_attempt: DateTime<Utc>,
}

/// In-process counter of verification attempts per email
///
/// Every verification reserves an attempt with [`AttemptTracker::try_reserve`]
/// before the store is consulted. A wrong code keeps the reservation; any
/// other outcome hands it back with [`AttemptTracker::release`] or clears the
/// counter with [`AttemptTracker::reset`]. Checking and reserving happen under
/// one write lock, so concurrent guesses can never exceed the limit.
///
/// Disabled when constructed with `None`; every method is then a no-op.
pub struct AttemptTracker {
    max_failed_attempts: Option<u32>,
    entries: RwLock<HashMap<String, AttemptEntry>>,
}

impl AttemptTracker {
    pub fn new(max_failed_attempts: Option<u32>) -> Self {
        Self {
            max_failed_attempts,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_failed_attempts.is_some()
    }

    /// Reserve one attempt for `email`
    ///
    /// # Returns
    /// * `Ok(count)` - The attempt is reserved; `count` includes it
    /// * `Err(max)` - The email has used up its attempts
    pub async fn try_reserve(&self, email: &str) -> Result<u32, u32> {
        let max = match self.max_failed_attempts {
            Some(max) => max,
            None => return Ok(0),
        };
        let mut entries = self.entries.write().await;
        let entry = entries.entry(email.to_string()).or_insert(AttemptEntry {
            count: 0,
            last_attempt: Utc::now(),
        });
        if entry.count >= max {
            return Err(max);
        }
        entry.count += 1;
        entry.last_attempt = Utc::now();
        Ok(entry.count)
    }

    /// Hand back a reservation that did not end in a wrong code
    pub async fn release(&self, email: &str) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(email) {
            entry.count = entry.count.saturating_sub(1);
            if entry.count == 0 {
                entries.remove(email);
            }
        }
    }

    /// Attempts currently held against `email`
    pub async fn failures(&self, email: &str) -> u32 {
        self.entries
            .read()
            .await
            .get(email)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub async fn reset(&self, email: &str) {
        if self.is_enabled() {
            self.entries.write().await.remove(email);
        }
    }

    /// Drop counters whose last attempt is older than `cutoff`
    ///
    /// A counter last touched before the cutoff belongs to a record that is
    /// itself older than the cutoff, so it goes away with the swept record.
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        if !self.is_enabled() {
            return 0;
        }
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.last_attempt >= cutoff);
        before - entries.len()
    }
}
