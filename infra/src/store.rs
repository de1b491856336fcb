//! Code store selection
//!
//! Picks the `OtpRepository` implementation named by `OTP_STORE_BACKEND`
//! and prepares it for use.

use std::sync::Arc;

use otp_core::repositories::{InMemoryOtpRepository, OtpRepository};
use otp_shared::config::StoreBackend;

use crate::config::InfrastructureConfig;
use crate::InfrastructureError;

/// Create the configured code store
///
/// For MySQL this opens the pool and, when `DATABASE_RUN_MIGRATIONS` is set,
/// creates the `otps` table. For Redis it connects with retry.
pub async fn create_otp_repository(
    config: &InfrastructureConfig,
) -> Result<Arc<dyn OtpRepository>, InfrastructureError> {
    match config.otp.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory OTP store; codes are lost on restart");
            Ok(Arc::new(InMemoryOtpRepository::new()))
        }
        StoreBackend::Mysql => create_mysql_repository(config).await,
        StoreBackend::Redis => create_redis_repository(config).await,
    }
}

#[cfg(feature = "mysql")]
async fn create_mysql_repository(
    config: &InfrastructureConfig,
) -> Result<Arc<dyn OtpRepository>, InfrastructureError> {
    use crate::database::{DatabasePool, MySqlOtpRepository};

    let pool = DatabasePool::new(&config.database).await?;
    let repository = MySqlOtpRepository::new(pool.get_pool().clone());
    if config.database.run_migrations {
        repository.migrate().await?;
    }
    tracing::info!("Using MySQL OTP store");
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "mysql"))]
async fn create_mysql_repository(
    _config: &InfrastructureConfig,
) -> Result<Arc<dyn OtpRepository>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "MySQL store requested but the `mysql` feature is disabled".to_string(),
    ))
}

#[cfg(feature = "redis-cache")]
async fn create_redis_repository(
    config: &InfrastructureConfig,
) -> Result<Arc<dyn OtpRepository>, InfrastructureError> {
    use crate::cache::{RedisClient, RedisOtpRepository};

    let client = RedisClient::new(config.cache.clone()).await?;
    tracing::info!("Using Redis OTP store");
    Ok(Arc::new(RedisOtpRepository::new(client)))
}

#[cfg(not(feature = "redis-cache"))]
async fn create_redis_repository(
    _config: &InfrastructureConfig,
) -> Result<Arc<dyn OtpRepository>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "Redis store requested but the `redis-cache` feature is disabled".to_string(),
    ))
}
