use crate::domain::ports::AnalysisService;
use crate::utils::error::PipelineError;
use serde_json::{json, Value};

/// Message placed in the `error` field when a component fails.
pub fn failure_message<S: AnalysisService + ?Sized>(service: &S, error: &PipelineError) -> String {
    match error {
        PipelineError::ModelUnavailable => error.to_string(),
        other => format!("{}: {}", service.failure_context(), other),
    }
}

/// Runs one text through a component and renders the outcome as JSON, folding
/// failures into `{"error": ...}`.
pub async fn process_to_value<S: AnalysisService>(service: &S, text: &str) -> Value {
    match service.process(text).await {
        Ok(output) => serde_json::to_value(output)
            .unwrap_or_else(|e| json!({ "error": format!("{}: {}", service.failure_context(), e) })),
        Err(e) => {
            tracing::error!("❌ {}: {}", service.service_name(), e);
            json!({ "error": failure_message(service, &e) })
        }
    }
}

/// Batch items that are not strings become per-item errors.
pub async fn process_item<S: AnalysisService>(service: &S, item: &Value) -> Value {
    match item.as_str() {
        Some(text) => process_to_value(service, text).await,
        None => json!({
            "error": format!("{}: expected a string, got {}", service.failure_context(), item)
        }),
    }
}
