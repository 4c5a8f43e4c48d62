use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use legal_pipeline::adapters::lexicon::{LexiconClauseClassifier, PatternEntityRecognizer};
use legal_pipeline::adapters::model_loader::ModelLoad;
use legal_pipeline::app::routes::{
    clause_analyzer_router, doc_classifier_router, entity_recognizer_router, suite_router,
};
use legal_pipeline::core::clause_analyzer::ClauseAnalyzer;
use legal_pipeline::core::document_classifier::DocumentClassifier;
use legal_pipeline::core::entity_recognizer::EntityRecognizer;
use legal_pipeline::NlpSuite;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const LEASE_TEXT: &str = "The landlord shall lease the property to the tenant for monthly rent.";

fn recognizer() -> EntityRecognizer {
    EntityRecognizer::new(ModelLoad::heuristic(Arc::new(
        PatternEntityRecognizer::new().expect("entity patterns compile"),
    )))
}

fn analyzer() -> ClauseAnalyzer {
    ClauseAnalyzer::new(ModelLoad::heuristic(Arc::new(LexiconClauseClassifier::new())))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

fn post_raw(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_service_and_model_state() {
    let router = doc_classifier_router(Arc::new(DocumentClassifier::keyword()));
    let (status, body) = send(router, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"service": "Document Classifier", "status": "running", "model_loaded": true})
    );
}

#[tokio::test]
async fn test_classify_returns_keyword_classification() {
    let router = doc_classifier_router(Arc::new(DocumentClassifier::keyword()));
    let (status, body) = send(router, post_json("/classify", json!({"text": LEASE_TEXT}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_type"], "lease");
    assert_eq!(body["method"], "keyword_matching");
    assert_eq!(body["text_length"], LEASE_TEXT.chars().count());
    assert_eq!(body["word_count"], 12);
}

#[tokio::test]
async fn test_single_endpoint_validation_errors() {
    let router = doc_classifier_router(Arc::new(DocumentClassifier::keyword()));

    let (status, body) = send(router.clone(), post_json("/classify", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text field required");

    let (status, body) = send(router.clone(), post_json("/classify", json!({"text": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Empty text provided"}));

    let (status, body) = send(router.clone(), post_json("/classify", json!({"text": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Empty text provided");

    // 非 JSON 內容
    let (status, body) = send(router, post_raw("/classify", "not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_batch_validation_and_per_item_errors() {
    let router = doc_classifier_router(Arc::new(DocumentClassifier::keyword()));

    let (status, body) = send(router.clone(), post_json("/batch_classify", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Texts array required");

    let (status, body) = send(
        router.clone(),
        post_json("/batch_classify", json!({"texts": "one text"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Texts must be an array");

    let (status, body) = send(
        router,
        post_json("/batch_classify", json!({"texts": [LEASE_TEXT, 42]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["document_type"], "lease");
    assert!(results[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("Classification failed"));
}

#[tokio::test]
async fn test_empty_batch_returns_empty_results() {
    let router = entity_recognizer_router(Arc::new(recognizer()));
    let (status, body) = send(router, post_json("/batch_extract", json!({"texts": []}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));
}

#[tokio::test]
async fn test_extract_groups_entities_by_label() {
    let router = entity_recognizer_router(Arc::new(recognizer()));
    let text = "Agreement between ABC Corporation and Mr. John Smith of Mumbai.";
    let (status, body) = send(router, post_json("/extract", json!({"text": text}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_entities"], 5);
    assert_eq!(body["entities"]["B-PER"][0]["text"], "John");
    assert_eq!(body["entities"]["B-LOC"][0]["text"], "Mumbai");
    let types: Vec<&str> = body["entity_types"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(types.contains(&"B-ORG"));
    assert!(types.contains(&"I-ORG"));
}

#[tokio::test]
async fn test_analyze_reports_clause_risk() {
    let router = clause_analyzer_router(Arc::new(analyzer()));
    let text = "The tenant shall pay a penalty and liquidated damages for late payment. \
                This lease is governed by the laws of Maharashtra.";
    let (status, body) = send(router, post_json("/analyze", json!({"text": text}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_clauses"], 2);
    assert_eq!(body["clauses"][0]["classification"], "penalty");
    assert_eq!(body["clauses"][0]["risk_level"], "High");
    assert_eq!(body["clauses"][1]["classification"], "governing_law");
    assert_eq!(body["clauses"][1]["risk_level"], "Medium");
    assert_eq!(
        body["risk_summary"],
        json!({"high_risk": 1, "medium_risk": 1, "low_risk": 0})
    );
    assert_eq!(body["overall_risk"], "High");
}

#[tokio::test]
async fn test_unavailable_model_returns_500() {
    let analyzer = ClauseAnalyzer::new(ModelLoad::Unavailable {
        reason: "inference endpoint unreachable".to_string(),
    });
    let router = clause_analyzer_router(Arc::new(analyzer));

    let (_, health) = send(router.clone(), get("/")).await;
    assert_eq!(health["model_loaded"], false);

    let (status, body) = send(router, post_json("/analyze", json!({"text": LEASE_TEXT}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded"}));
}

#[tokio::test]
async fn test_suite_serves_every_component() {
    let router = suite_router(NlpSuite::new(
        DocumentClassifier::keyword(),
        recognizer(),
        analyzer(),
    ));

    let (status, health) = send(router.clone(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["service"], "Legal NLP Services");
    assert_eq!(health["model_loaded"], true);

    for uri in ["/classify", "/extract", "/analyze"] {
        let (status, body) = send(router.clone(), post_json(uri, json!({"text": LEASE_TEXT}))).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.get("error").is_none(), "{}: {}", uri, body);
    }

    let (status, body) = send(router, post_json("/analyze_all", json!({"text": LEASE_TEXT}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_classification"]["document_type"], "lease");
    assert_eq!(body["entity_recognition"]["total_entities"], 0);
    assert_eq!(body["clause_analysis"]["total_clauses"], 1);
    assert_eq!(body["word_count"], 12);
}
