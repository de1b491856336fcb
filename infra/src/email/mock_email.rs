//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them and keeps a copy in memory so
//! tests and local runs can read the delivered code.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use otp_core::services::NotifierTrait;
use otp_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// A message captured by the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mock email service for development and testing
///
/// Clones share the same outbox and counters.
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every delivered message, oldest first
    outbox: Arc<Mutex<Vec<SentEmail>>>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every send
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Copy of every message delivered so far
    pub fn sent_messages(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// The latest message delivered to `recipient`
    pub fn last_message_to(&self, recipient: &str) -> Option<SentEmail> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|m| m.recipient == recipient)
    }

    /// The six-digit code in the latest message to `recipient`
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.last_message_to(recipient).and_then(|m| {
            m.body
                .split(|c: char| !c.is_ascii_digit())
                .find(|word| word.len() == otp_core::CODE_LENGTH)
                .map(String::from)
        })
    }

    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_email(recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                provider = "mock",
                email = %masked,
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock-msg-{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(SentEmail {
                message_id: message_id.clone(),
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            message_number = count,
            subject = subject,
            body = body,
            "Email sent (mock)"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl NotifierTrait for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String> {
        self.send_email(recipient, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
