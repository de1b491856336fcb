//! Background sweeper for stale OTP records
//!
//! Records that outlive the TTL are already unusable; the sweeper only keeps
//! the store from growing with them.

use std::sync::Arc;
use tracing::{error, info, warn};

use otp_shared::config::OtpConfig;
use otp_shared::config::otp::DEFAULT_SWEEP_INTERVAL_SECONDS;

use crate::repositories::OtpRepository;

use super::service::OtpService;
use super::traits::NotifierTrait;

/// Configuration for the OTP sweeper
#[derive(Debug, Clone)]
pub struct OtpSweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for OtpSweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
            enabled: true,
        }
    }
}

impl OtpSweeperConfig {
    pub fn from_config(otp: &OtpConfig) -> Self {
        Self {
            interval_seconds: otp.sweep_interval_seconds.max(1),
            enabled: otp.sweep_enabled,
        }
    }
}

/// Periodic sweep of records older than the TTL
pub struct OtpSweeper<S: OtpRepository + ?Sized + 'static, N: NotifierTrait + ?Sized + 'static> {
    service: Arc<OtpService<S, N>>,
    config: OtpSweeperConfig,
}

impl<S: OtpRepository + ?Sized + 'static, N: NotifierTrait + ?Sized + 'static> OtpSweeper<S, N> {
    pub fn new(service: Arc<OtpService<S, N>>, config: OtpSweeperConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep cycle
    ///
    /// Failures are captured in the result rather than returned.
    pub async fn run_sweep(&self) -> SweepResult {
        if !self.config.enabled {
            return SweepResult::default();
        }

        match self.service.sweep_expired().await {
            Ok(deleted) => {
                if deleted > 0 {
                    info!("Deleted {} expired OTP records", deleted);
                }
                SweepResult {
                    deleted,
                    error: None,
                }
            }
            Err(e) => {
                error!("Failed to sweep expired OTP records: {}", e);
                SweepResult {
                    deleted: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals. Returns
    /// `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP sweeper is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "OTP sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_sweep().await;
                if let Some(e) = result.error {
                    warn!("OTP sweep cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of records deleted
    pub deleted: u64,
    /// Error encountered, if the cycle failed
    pub error: Option<String>,
}

impl SweepResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
