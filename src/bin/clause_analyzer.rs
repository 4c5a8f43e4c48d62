use anyhow::Context;
use clap::Parser;
use legal_pipeline::app::{bootstrap, routes, server};
use legal_pipeline::config::service::CLAUSE_ANALYZER;
use legal_pipeline::utils::logger;
use legal_pipeline::ServiceConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    logger::init_service_logger(config.verbose, config.log_json);

    tracing::info!("Starting {}", CLAUSE_ANALYZER.service_name);
    server::exit_on_invalid_config(&config);

    let analyzer = bootstrap::load_clause_analyzer(&config)
        .await
        .context("failed to load clause analyzer")?;

    server::serve(
        routes::clause_analyzer_router(Arc::new(analyzer)),
        &config.host,
        config.port_for(&CLAUSE_ANALYZER),
    )
    .await
    .context("clause analyzer server failed")?;

    Ok(())
}
