//! Traits for notifier integration

use async_trait::async_trait;

/// Trait for the outbound message channel (email relay)
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    /// Deliver a plain-text message
    ///
    /// # Returns
    /// The provider's message id on success, a description of the failure otherwise
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<String, String>;
}
