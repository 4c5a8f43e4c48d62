use anyhow::Context;
use clap::Parser;
use legal_pipeline::app::{bootstrap, routes, server};
use legal_pipeline::config::service::ENTITY_RECOGNIZER;
use legal_pipeline::utils::logger;
use legal_pipeline::ServiceConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    logger::init_service_logger(config.verbose, config.log_json);

    tracing::info!("Starting {}", ENTITY_RECOGNIZER.service_name);
    server::exit_on_invalid_config(&config);

    let recognizer = bootstrap::load_entity_recognizer(&config)
        .await
        .context("failed to load entity recognizer")?;

    server::serve(
        routes::entity_recognizer_router(Arc::new(recognizer)),
        &config.host,
        config.port_for(&ENTITY_RECOGNIZER),
    )
    .await
    .context("entity recognizer server failed")?;

    Ok(())
}
