use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use ev_api::{configure, AppState};
use ev_core::services::{VerificationService, VerificationServiceConfig};
use ev_shared::config::{LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = ev_infra::load_config();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        backend = %config.storage.backend,
        "Starting MailCode API Server"
    );

    let services = ev_infra::initialize(&config).await?;

    let verification = Arc::new(VerificationService::new(
        services.repository.clone(),
        services.notifier.clone(),
        VerificationServiceConfig::from(config.otp.clone()),
    ));
    let state = web::Data::new(AppState::new(verification));

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TracingLogger::default())
            .configure(|cfg| configure(cfg, state, max_payload_size))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server.bind(&bind_address)?.run().await;

    services.shutdown().await;
    result?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
