use crate::app::routes::ApiError;
use crate::config::DEFAULT_ANALYSIS_TYPE;
use crate::core::orchestrator::LegalAnalysisPipeline;
use crate::domain::model::{AnalyzeRequest, AnalyzeResponse, HealthStatus};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub const ORCHESTRATOR_SERVICE_NAME: &str = "Legal AI Pipeline - Main Orchestration";

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::running(ORCHESTRATOR_SERVICE_NAME, true))
}

async fn analyze_document(
    State(pipeline): State<Arc<LegalAnalysisPipeline>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            return ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text()))
                .into_response()
        }
    };

    let text = match request.text {
        None => return ApiError::bad_request("Text field required").into_response(),
        Some(text) if text.trim().is_empty() => {
            return ApiError::bad_request("Empty text provided").into_response()
        }
        Some(text) => text,
    };

    // 只有缺少欄位時才用預設值，空字串照原樣傳下去
    let analysis_type = request
        .analysis_type
        .unwrap_or_else(|| DEFAULT_ANALYSIS_TYPE.to_string());

    let analysis = pipeline.analyze(&text, &analysis_type).await;
    Json(AnalyzeResponse { analysis }).into_response()
}

pub fn orchestrator_router(pipeline: Arc<LegalAnalysisPipeline>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze_document))
        .with_state(pipeline)
}
