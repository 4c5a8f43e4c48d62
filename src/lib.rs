pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{BackendMode, OrchestratorConfig, ServiceConfig};
pub use core::{orchestrator::LegalAnalysisPipeline, suite::NlpSuite};
pub use utils::error::{PipelineError, Result};
