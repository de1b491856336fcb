use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use otp_api::app::create_app;
use otp_api::config::{init_tracing, load_config};
use otp_api::routes::otp::AppState;
use otp_core::services::{OtpService, OtpServiceConfig, OtpSweeper, OtpSweeperConfig};
use otp_infra::config::InfrastructureConfig;
use otp_infra::{create_notifier, create_otp_repository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        store = ?config.otp.store_backend,
        email_provider = ?config.email.provider,
        "Starting MailOTP API Server"
    );

    let infra_config = InfrastructureConfig::from_app_config(&config);
    let repository = create_otp_repository(&infra_config)
        .await
        .context("Failed to initialize the OTP store")?;
    let notifier = create_notifier(&config.email).context("Failed to initialize the notifier")?;

    let otp_service = Arc::new(OtpService::new(
        repository,
        notifier,
        OtpServiceConfig::from_config(&config.otp, config.email.subject.clone()),
    ));

    let sweeper = Arc::new(OtpSweeper::new(
        otp_service.clone(),
        OtpSweeperConfig::from_config(&config.otp),
    ));
    let sweeper_handle = sweeper.start_background_task();

    let app_state = web::Data::new(
        AppState::new(otp_service).with_max_payload_size(config.server.max_payload_size),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone()).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}
