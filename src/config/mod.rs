pub mod service;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_secret, validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::time::Duration;

pub use service::{BackendMode, ComponentSpec, ServiceConfig};

pub const DEFAULT_ANALYSIS_TYPE: &str = "Full Legal Analysis";

#[derive(Debug, Clone, Parser)]
#[command(name = "legal-pipeline")]
#[command(about = "Orchestrates the legal NLP services and an Azure OpenAI deployment")]
pub struct OrchestratorConfig {
    #[arg(long, env = "PORT", default_value = "7860")]
    pub port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "DOC_CLASSIFIER_URL", default_value = "http://localhost:5000")]
    pub doc_classifier_url: String,

    #[arg(long, env = "ENTITY_RECOGNIZER_URL", default_value = "http://localhost:5001")]
    pub entity_recognizer_url: String,

    #[arg(long, env = "CLAUSE_ANALYZER_URL", default_value = "http://localhost:5002")]
    pub clause_analyzer_url: String,

    #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
    pub azure_endpoint: String,

    #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
    pub azure_api_key: String,

    #[arg(long, env = "AZURE_OPENAI_API_VERSION", default_value = "2025-01-01-preview")]
    pub azure_api_version: String,

    #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT_NAME", default_value = "gpt-4o")]
    pub azure_deployment: String,

    #[arg(long, env = "SERVICE_TIMEOUT_SECS", default_value = "30")]
    pub service_timeout_secs: u64,

    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value = "60")]
    pub llm_timeout_secs: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl OrchestratorConfig {
    pub fn service_timeout(&self) -> Duration {
        Duration::from_secs(self.service_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

impl Validate for OrchestratorConfig {
    fn validate(&self) -> Result<()> {
        validate_url("doc_classifier_url", &self.doc_classifier_url)?;
        validate_url("entity_recognizer_url", &self.entity_recognizer_url)?;
        validate_url("clause_analyzer_url", &self.clause_analyzer_url)?;

        validate_non_empty_secret("AZURE_OPENAI_ENDPOINT", &self.azure_endpoint)?;
        validate_url("azure_endpoint", &self.azure_endpoint)?;
        validate_non_empty_secret("AZURE_OPENAI_API_KEY", &self.azure_api_key)?;
        validate_non_empty_string("azure_api_version", &self.azure_api_version)?;
        validate_non_empty_string("azure_deployment", &self.azure_deployment)?;

        validate_range("service_timeout_secs", self.service_timeout_secs, 1, 300)?;
        validate_range("llm_timeout_secs", self.llm_timeout_secs, 1, 600)?;

        tracing::debug!("✅ Orchestrator configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PipelineError;
    use clap::CommandFactory;

    fn args() -> Vec<&'static str> {
        vec![
            "legal-pipeline",
            "--azure-endpoint",
            "https://example.openai.azure.com",
            "--azure-api-key",
            "secret",
        ]
    }

    #[test]
    fn defaults_match_documented_ports_and_timeouts() {
        let config = OrchestratorConfig::parse_from(args());
        assert_eq!(config.azure_deployment, "gpt-4o");
        assert_eq!(config.service_timeout(), Duration::from_secs(30));
        assert_eq!(config.llm_timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_api_key_fails_fast() {
        // 關掉環境變數來源，避免本機設定影響結果
        let mut command = OrchestratorConfig::command()
            .mut_arg("azure_api_key", |arg| arg.env(None::<&'static str>));
        let err = command
            .try_get_matches_from_mut([
                "legal-pipeline",
                "--azure-endpoint",
                "https://example.openai.azure.com",
            ])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn blank_api_key_is_rejected_by_validation() {
        let mut config = OrchestratorConfig::parse_from(args());
        config.azure_api_key = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(PipelineError::MissingConfigError { .. })
        ));
    }
}
