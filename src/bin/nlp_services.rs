use anyhow::Context;
use clap::Parser;
use legal_pipeline::app::{bootstrap, routes, server};
use legal_pipeline::config::service::DOC_CLASSIFIER;
use legal_pipeline::core::suite::SUITE_SERVICE_NAME;
use legal_pipeline::utils::logger;
use legal_pipeline::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    logger::init_service_logger(config.verbose, config.log_json);

    tracing::info!("Starting {}", SUITE_SERVICE_NAME);
    server::exit_on_invalid_config(&config);

    let suite = bootstrap::load_suite(&config)
        .await
        .context("failed to load NLP components")?;

    if !suite.models_loaded() {
        tracing::warn!("⚠️ Some components have no backend; their endpoints will return errors");
    }

    // 合併服務沿用文件分類服務的預設埠
    server::serve(
        routes::suite_router(suite),
        &config.host,
        config.port_for(&DOC_CLASSIFIER),
    )
    .await
    .context("NLP services server failed")?;

    Ok(())
}
