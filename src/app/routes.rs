use crate::core::clause_analyzer::ClauseAnalyzer;
use crate::core::document_classifier::DocumentClassifier;
use crate::core::entity_recognizer::EntityRecognizer;
use crate::core::service::{failure_message, process_item};
use crate::core::suite::{NlpSuite, SUITE_SERVICE_NAME};
use crate::domain::model::{BatchRequest, HealthStatus, TextRequest};
use crate::domain::ports::AnalysisService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// `{"error": ...}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Extracts a non-blank `text` field.
pub fn require_text(payload: Result<Json<TextRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))?;

    match request.text {
        None => Err(ApiError::bad_request("Text field required")),
        Some(text) if text.trim().is_empty() => Err(ApiError::bad_request("Empty text provided")),
        Some(text) => Ok(text),
    }
}

fn require_texts(payload: Result<Json<BatchRequest>, JsonRejection>) -> Result<Vec<Value>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))?;

    match request.texts {
        None => Err(ApiError::bad_request("Texts array required")),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ApiError::bad_request("Texts must be an array")),
    }
}

async fn health<S: AnalysisService>(State(service): State<Arc<S>>) -> Json<HealthStatus> {
    Json(HealthStatus::running(
        service.service_name(),
        service.model_loaded(),
    ))
}

async fn handle_single<S: AnalysisService>(
    State(service): State<Arc<S>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Response {
    let text = match require_text(payload) {
        Ok(text) => text,
        Err(e) => return e.into_response(),
    };

    tracing::debug!("{} request ({} chars)", service.service_name(), text.len());

    match service.process(&text).await {
        Ok(output) => Json(output).into_response(),
        Err(e) => {
            tracing::error!("Error in {} endpoint: {}", service.service_name(), e);
            ApiError::internal(failure_message(service.as_ref(), &e)).into_response()
        }
    }
}

async fn handle_batch<S: AnalysisService>(
    State(service): State<Arc<S>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let texts = match require_texts(payload) {
        Ok(texts) => texts,
        Err(e) => return e.into_response(),
    };

    tracing::debug!("{} batch of {}", service.service_name(), texts.len());

    let mut results = Vec::with_capacity(texts.len());
    for item in &texts {
        results.push(process_item(service.as_ref(), item).await);
    }

    Json(json!({ "results": results })).into_response()
}

/// Single and batch routes for one component, without the health route.
pub fn component_routes<S: AnalysisService>(
    service: Arc<S>,
    single_path: &str,
    batch_path: &str,
) -> Router {
    Router::new()
        .route(single_path, post(handle_single::<S>))
        .route(batch_path, post(handle_batch::<S>))
        .with_state(service)
}

/// Full router for a standalone component service.
pub fn service_router<S: AnalysisService>(
    service: Arc<S>,
    single_path: &str,
    batch_path: &str,
) -> Router {
    component_routes(service.clone(), single_path, batch_path)
        .merge(Router::new().route("/", get(health::<S>)).with_state(service))
}

pub fn doc_classifier_router(service: Arc<DocumentClassifier>) -> Router {
    service_router(service, "/classify", "/batch_classify")
}

pub fn entity_recognizer_router(service: Arc<EntityRecognizer>) -> Router {
    service_router(service, "/extract", "/batch_extract")
}

pub fn clause_analyzer_router(service: Arc<ClauseAnalyzer>) -> Router {
    service_router(service, "/analyze", "/batch_analyze")
}

async fn suite_health(State(suite): State<Arc<NlpSuite>>) -> Json<HealthStatus> {
    Json(HealthStatus::running(
        SUITE_SERVICE_NAME,
        suite.models_loaded(),
    ))
}

async fn analyze_all(
    State(suite): State<Arc<NlpSuite>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Response {
    match require_text(payload) {
        Ok(text) => Json(suite.analyze_all(&text).await).into_response(),
        Err(e) => e.into_response(),
    }
}

/// All three components plus `/analyze_all` on one port.
pub fn suite_router(suite: NlpSuite) -> Router {
    let suite = Arc::new(suite);

    component_routes(suite.classifier.clone(), "/classify", "/batch_classify")
        .merge(component_routes(
            suite.recognizer.clone(),
            "/extract",
            "/batch_extract",
        ))
        .merge(component_routes(
            suite.analyzer.clone(),
            "/analyze",
            "/batch_analyze",
        ))
        .merge(
            Router::new()
                .route("/", get(suite_health))
                .route("/analyze_all", post(analyze_all))
                .with_state(suite),
        )
}
