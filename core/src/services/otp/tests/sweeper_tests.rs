//! Unit tests for the background sweeper

use chrono::{Duration, Utc};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::repositories::{InMemoryOtpRepository, OtpRepository};
use crate::services::otp::{OtpService, OtpServiceConfig, OtpSweeper, OtpSweeperConfig};

use super::mocks::{FailingOtpRepository, RecordingNotifier};

#[tokio::test]
async fn test_run_sweep_deletes_stale_records() {
    let repository = Arc::new(InMemoryOtpRepository::new());
    let service = Arc::new(OtpService::new(
        repository.clone(),
        Arc::new(RecordingNotifier::new(false)),
        OtpServiceConfig::default(),
    ));
    let now = Utc::now();
    repository.upsert("old@x.com", "111111", now - Duration::minutes(3)).await.unwrap();
    repository.upsert("new@x.com", "222222", now).await.unwrap();

    let sweeper = OtpSweeper::new(service, OtpSweeperConfig::default());
    let result = sweeper.run_sweep().await;

    assert!(result.is_success());
    assert_eq!(result.deleted, 1);
    assert!(repository.find_by_email("new@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_run_sweep_captures_failure() {
    let repository = Arc::new(FailingOtpRepository::new());
    repository.fail_sweep.store(true, Ordering::SeqCst);
    let service = Arc::new(OtpService::new(
        repository,
        Arc::new(RecordingNotifier::new(false)),
        OtpServiceConfig::default(),
    ));

    let sweeper = OtpSweeper::new(service, OtpSweeperConfig::default());
    let result = sweeper.run_sweep().await;

    assert!(!result.is_success());
    assert_eq!(result.deleted, 0);
    assert!(result.error.unwrap().contains("delete_older_than"));
}

#[tokio::test]
async fn test_disabled_sweeper() {
    let repository = Arc::new(InMemoryOtpRepository::new());
    repository
        .upsert("old@x.com", "111111", Utc::now() - Duration::minutes(3))
        .await
        .unwrap();
    let service = Arc::new(OtpService::new(
        repository.clone(),
        Arc::new(RecordingNotifier::new(false)),
        OtpServiceConfig::default(),
    ));
    let config = OtpSweeperConfig {
        enabled: false,
        ..OtpSweeperConfig::default()
    };

    let sweeper = Arc::new(OtpSweeper::new(service, config));
    assert_eq!(sweeper.run_sweep().await.deleted, 0);
    assert!(sweeper.start_background_task().is_none());
    assert_eq!(repository.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let repository = Arc::new(InMemoryOtpRepository::new());
    let service = Arc::new(OtpService::new(
        repository.clone(),
        Arc::new(RecordingNotifier::new(false)),
        OtpServiceConfig::default(),
    ));
    let config = OtpSweeperConfig {
        interval_seconds: 60,
        enabled: true,
    };

    let sweeper = Arc::new(OtpSweeper::new(service, config));
    let handle = sweeper.start_background_task().unwrap();

    // First tick fires immediately
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    repository
        .upsert("old@x.com", "111111", Utc::now() - Duration::minutes(3))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;

    assert!(repository.is_empty().await);
    handle.abort();
}
