use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 模型後端選擇策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Remote model when an inference endpoint is configured, heuristic otherwise
    Auto,
    /// Remote model only; requests fail with "Model not loaded" if it cannot be reached
    Remote,
    /// Local deterministic heuristics only
    Heuristic,
}

/// Static description of one NLP component.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSpec {
    pub service_name: &'static str,
    pub default_port: u16,
    pub primary_model: &'static str,
    pub fallback_model: &'static str,
}

pub const DOC_CLASSIFIER: ComponentSpec = ComponentSpec {
    service_name: "Document Classifier",
    default_port: 5000,
    primary_model: "prajjwal1/bert-tiny",
    fallback_model: "distilbert-base-uncased",
};

pub const ENTITY_RECOGNIZER: ComponentSpec = ComponentSpec {
    service_name: "Entity Recognizer",
    default_port: 5001,
    primary_model: "dbmdz/bert-large-cased-finetuned-conll03-english",
    fallback_model: "distilbert-base-cased",
};

pub const CLAUSE_ANALYZER: ComponentSpec = ComponentSpec {
    service_name: "Clause Analyzer",
    default_port: 5002,
    primary_model: "nlpaueb/legal-bert-base-uncased",
    fallback_model: "distilbert-base-uncased",
};

#[derive(Debug, Clone, Parser)]
#[command(about = "Legal NLP component service")]
pub struct ServiceConfig {
    /// Listening port; each component has its own default
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "MODEL_BACKEND", value_enum, default_value_t = BackendMode::Auto)]
    pub backend: BackendMode,

    /// Base URL of a Hugging Face style inference API
    #[arg(long, env = "INFERENCE_API_URL")]
    pub inference_url: Option<String>,

    #[arg(long, env = "INFERENCE_API_TOKEN", hide_env_values = true)]
    pub inference_token: Option<String>,

    /// Overrides the component's primary model id
    #[arg(long, env = "MODEL_ID")]
    pub model_id: Option<String>,

    /// Overrides the component's fallback model id
    #[arg(long, env = "FALLBACK_MODEL_ID")]
    pub fallback_model_id: Option<String>,

    #[arg(long, env = "INFERENCE_TIMEOUT_SECS", default_value = "30")]
    pub inference_timeout_secs: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ServiceConfig {
    pub fn port_for(&self, spec: &ComponentSpec) -> u16 {
        self.port.unwrap_or(spec.default_port)
    }

    /// Model ids to try, in order.
    pub fn model_candidates(&self, spec: &ComponentSpec) -> Vec<String> {
        vec![
            self.model_id
                .clone()
                .unwrap_or_else(|| spec.primary_model.to_string()),
            self.fallback_model_id
                .clone()
                .unwrap_or_else(|| spec.fallback_model.to_string()),
        ]
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: None,
            host: "0.0.0.0".to_string(),
            backend: BackendMode::Auto,
            inference_url: None,
            inference_token: None,
            model_id: None,
            fallback_model_id: None,
            inference_timeout_secs: 30,
            verbose: false,
            log_json: false,
        }
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.inference_url {
            validate_url("inference_url", url)?;
        }

        if self.backend == BackendMode::Remote && self.inference_url.is_none() {
            return Err(PipelineError::MissingConfigError {
                field: "INFERENCE_API_URL (required when MODEL_BACKEND=remote)".to_string(),
            });
        }

        validate_range("inference_timeout_secs", self.inference_timeout_secs, 1, 600)?;

        if let Some(port) = self.port {
            validate_range("port", port, 1, u16::MAX)?;
        }

        tracing::debug!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_and_models_fall_back_to_component_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port_for(&CLAUSE_ANALYZER), 5002);
        assert_eq!(
            config.model_candidates(&ENTITY_RECOGNIZER),
            vec![
                "dbmdz/bert-large-cased-finetuned-conll03-english".to_string(),
                "distilbert-base-cased".to_string()
            ]
        );

        let config = ServiceConfig {
            port: Some(9000),
            model_id: Some("custom/model".to_string()),
            ..ServiceConfig::default()
        };
        assert_eq!(config.port_for(&DOC_CLASSIFIER), 9000);
        assert_eq!(config.model_candidates(&DOC_CLASSIFIER)[0], "custom/model");
    }

    #[test]
    fn remote_backend_requires_inference_url() {
        let config = ServiceConfig {
            backend: BackendMode::Remote,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::MissingConfigError { .. })
        ));

        let config = ServiceConfig {
            backend: BackendMode::Remote,
            inference_url: Some("https://api-inference.example.com".to_string()),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_from_command_line() {
        let config = ServiceConfig::parse_from([
            "doc_classifier",
            "--port",
            "5100",
            "--backend",
            "heuristic",
        ]);
        assert_eq!(config.port, Some(5100));
        assert_eq!(config.backend, BackendMode::Heuristic);
    }
}
