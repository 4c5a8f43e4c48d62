use anyhow::Context;
use clap::Parser;
use legal_pipeline::app::{bootstrap, routes, server};
use legal_pipeline::config::service::DOC_CLASSIFIER;
use legal_pipeline::utils::logger;
use legal_pipeline::ServiceConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    logger::init_service_logger(config.verbose, config.log_json);

    tracing::info!("Starting {}", DOC_CLASSIFIER.service_name);
    server::exit_on_invalid_config(&config);

    let classifier = bootstrap::load_document_classifier(&config)
        .await
        .context("failed to load document classifier")?;

    server::serve(
        routes::doc_classifier_router(Arc::new(classifier)),
        &config.host,
        config.port_for(&DOC_CLASSIFIER),
    )
    .await
    .context("document classifier server failed")?;

    Ok(())
}
