//! OTP policy configuration module

use serde::{Deserialize, Serialize};

/// Default code lifetime in seconds (2 minutes)
pub const DEFAULT_OTP_TTL_SECONDS: i64 = 120;

/// Longest accepted code lifetime in seconds (one day)
pub const MAX_OTP_TTL_SECONDS: i64 = 86_400;

/// Default interval between background sweeps in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Which code store implementation persists OTP records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mysql,
    Redis,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "database" | "db" => Ok(StoreBackend::Mysql),
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

/// OTP lifecycle policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a code stays valid after issuance
    pub ttl_seconds: i64,

    /// Delete the record after a successful verification
    #[serde(default)]
    pub consume_on_success: bool,

    /// Failed verifications allowed per email before locking it out
    /// until a new code is issued; `None` disables the limit
    #[serde(default)]
    pub max_failed_attempts: Option<u32>,

    /// Run the periodic background sweep
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// Seconds between background sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Code store backend
    pub store_backend: StoreBackend,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            consume_on_success: false,
            max_failed_attempts: None,
            sweep_enabled: default_sweep_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
            store_backend: StoreBackend::Mysql,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let ttl_seconds = std::env::var("OTP_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_OTP_TTL_SECONDS.to_string())
            .parse()
            .unwrap_or(DEFAULT_OTP_TTL_SECONDS);
        let consume_on_success = std::env::var("OTP_CONSUME_ON_SUCCESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let max_failed_attempts = std::env::var("OTP_MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok());
        let sweep_enabled = std::env::var("OTP_SWEEP_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or_else(|_| default_sweep_enabled());
        let sweep_interval_seconds = std::env::var("OTP_SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECONDS.to_string())
            .parse()
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECONDS);
        let store_backend = std::env::var("OTP_STORE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(StoreBackend::Mysql);

        Self {
            ttl_seconds,
            consume_on_success,
            max_failed_attempts,
            sweep_enabled,
            sweep_interval_seconds,
            store_backend,
        }
    }
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECONDS
}
