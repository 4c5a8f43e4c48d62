use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Inference failed: {message}")]
    InferenceError { message: String },

    #[error("{service} returned status {status}")]
    UpstreamStatus { service: String, status: u16 },
}

impl PipelineError {
    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceError {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "上游服務回應逾時 (request timed out)".to_string(),
            Self::ApiError(_) => "無法連線到上游服務 (upstream service unreachable)".to_string(),
            Self::MissingConfigError { field } => {
                format!("缺少必要設定: {}", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值無效 {}: {}", field, reason)
            }
            Self::ModelUnavailable => "模型尚未載入 (model not loaded)".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) | Self::UpstreamStatus { .. } => {
                "Check that the service URL is reachable and the service is running"
            }
            Self::MissingConfigError { .. } | Self::ConfigError { .. } => {
                "Set the missing environment variable or pass the matching command line flag"
            }
            Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value; URLs must start with http:// or https://"
            }
            Self::ModelUnavailable | Self::InferenceError { .. } => {
                "Check INFERENCE_API_URL / INFERENCE_API_TOKEN or run with MODEL_BACKEND=heuristic"
            }
            Self::IoError(_) => "Inspect the logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
