use anyhow::Context;
use clap::Parser;
use legal_pipeline::app::{orchestrator_routes::orchestrator_router, server};
use legal_pipeline::utils::logger;
use legal_pipeline::{LegalAnalysisPipeline, OrchestratorConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = OrchestratorConfig::parse();

    // 初始化日誌
    logger::init_service_logger(config.verbose, config.log_json);

    tracing::info!("🚀 Starting Legal AI Pipeline - Main Orchestration");

    // 驗證配置
    server::exit_on_invalid_config(&config);

    let pipeline = LegalAnalysisPipeline::from_config(&config)
        .context("failed to initialise legal analysis pipeline")?;

    server::serve(
        orchestrator_router(Arc::new(pipeline)),
        &config.host,
        config.port,
    )
    .await
    .context("orchestrator server failed")?;

    Ok(())
}
