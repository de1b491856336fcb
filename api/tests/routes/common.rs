use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use otp_api::routes::otp::AppState;
use otp_core::domain::entities::otp_record::OtpRecord;
use otp_core::errors::{OtpError, OtpResult};
use otp_core::repositories::{InMemoryOtpRepository, OtpRepository};
use otp_core::services::{OtpService, OtpServiceConfig};
use otp_infra::MockEmailService;

pub type TestState = AppState<InMemoryOtpRepository, MockEmailService>;

/// Helper function to create test application state
pub fn create_test_app_state(
    config: OtpServiceConfig,
) -> (TestState, Arc<InMemoryOtpRepository>, MockEmailService) {
    let repository = Arc::new(InMemoryOtpRepository::new());
    let notifier = MockEmailService::new();
    let service = Arc::new(OtpService::new(
        repository.clone(),
        Arc::new(notifier.clone()),
        config,
    ));
    (AppState::new(service), repository, notifier)
}

/// Store that fails every operation
pub struct UnavailableRepository;

#[async_trait]
impl OtpRepository for UnavailableRepository {
    async fn upsert(&self, _email: &str, _code: &str, _issued_at: DateTime<Utc>) -> OtpResult<()> {
        Err(OtpError::Store("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> OtpResult<Option<OtpRecord>> {
        Err(OtpError::Store("connection refused".to_string()))
    }

    async fn delete_older_than(&self, _cutoff: DateTime<Utc>) -> OtpResult<u64> {
        Err(OtpError::Store("connection refused".to_string()))
    }

    async fn delete(&self, _email: &str) -> OtpResult<bool> {
        Err(OtpError::Store("connection refused".to_string()))
    }
}
