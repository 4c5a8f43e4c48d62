use crate::adapters::inference::{HubTextClassifier, HubTokenClassifier, InferenceClient};
use crate::adapters::lexicon::{LexiconClauseClassifier, PatternEntityRecognizer};
use crate::adapters::model_loader::load_backend;
use crate::config::service::{CLAUSE_ANALYZER, DOC_CLASSIFIER, ENTITY_RECOGNIZER};
use crate::config::{ComponentSpec, ServiceConfig};
use crate::core::clause_analyzer::ClauseAnalyzer;
use crate::core::document_classifier::{DocumentClassifier, KeywordClassifier};
use crate::core::entity_recognizer::EntityRecognizer;
use crate::core::suite::NlpSuite;
use crate::domain::ports::{TextClassifier, TokenClassifier};
use crate::utils::error::Result;
use std::sync::Arc;

fn inference_client(config: &ServiceConfig) -> Result<Option<InferenceClient>> {
    config
        .inference_url
        .as_ref()
        .map(|url| {
            InferenceClient::new(
                url.clone(),
                config.inference_token.clone(),
                config.inference_timeout(),
            )
        })
        .transpose()
}

fn text_candidates(config: &ServiceConfig, spec: &ComponentSpec) -> Result<Vec<HubTextClassifier>> {
    Ok(match inference_client(config)? {
        Some(client) => config
            .model_candidates(spec)
            .into_iter()
            .map(|id| HubTextClassifier::new(client.clone(), id))
            .collect(),
        None => Vec::new(),
    })
}

pub async fn load_document_classifier(config: &ServiceConfig) -> Result<DocumentClassifier> {
    tracing::info!("Loading model for document classification...");
    let model = load_backend(
        config.backend,
        text_candidates(config, &DOC_CLASSIFIER)?,
        |c| Arc::new(c) as Arc<dyn TextClassifier>,
        || Ok(Arc::new(KeywordClassifier::new()) as Arc<dyn TextClassifier>),
    )
    .await;
    tracing::info!("Document classifier backend: {}", model.describe());
    Ok(DocumentClassifier::new(model))
}

pub async fn load_clause_analyzer(config: &ServiceConfig) -> Result<ClauseAnalyzer> {
    tracing::info!("Loading model for clause analysis...");
    let model = load_backend(
        config.backend,
        text_candidates(config, &CLAUSE_ANALYZER)?,
        |c| Arc::new(c) as Arc<dyn TextClassifier>,
        || Ok(Arc::new(LexiconClauseClassifier::new()) as Arc<dyn TextClassifier>),
    )
    .await;
    tracing::info!("Clause analyzer backend: {}", model.describe());
    Ok(ClauseAnalyzer::new(model))
}

pub async fn load_entity_recognizer(config: &ServiceConfig) -> Result<EntityRecognizer> {
    tracing::info!("Loading NER model for entity recognition...");
    let candidates: Vec<HubTokenClassifier> = match inference_client(config)? {
        Some(client) => config
            .model_candidates(&ENTITY_RECOGNIZER)
            .into_iter()
            .map(|id| HubTokenClassifier::new(client.clone(), id))
            .collect(),
        None => Vec::new(),
    };

    let model = load_backend(
        config.backend,
        candidates,
        |c| Arc::new(c) as Arc<dyn TokenClassifier>,
        || PatternEntityRecognizer::new().map(|r| Arc::new(r) as Arc<dyn TokenClassifier>),
    )
    .await;
    tracing::info!("Entity recognizer backend: {}", model.describe());
    Ok(EntityRecognizer::new(model))
}

/// Loads all three components. Per-component model overrides do not apply here.
pub async fn load_suite(config: &ServiceConfig) -> Result<NlpSuite> {
    if config.model_id.is_some() || config.fallback_model_id.is_some() {
        tracing::warn!("MODEL_ID / FALLBACK_MODEL_ID are ignored by the combined service");
    }
    let shared = ServiceConfig {
        model_id: None,
        fallback_model_id: None,
        ..config.clone()
    };

    let (classifier, recognizer, analyzer) = tokio::join!(
        load_document_classifier(&shared),
        load_entity_recognizer(&shared),
        load_clause_analyzer(&shared),
    );

    Ok(NlpSuite::new(classifier?, recognizer?, analyzer?))
}
