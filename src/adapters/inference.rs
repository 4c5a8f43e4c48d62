//! Remote model backends speaking the Hugging Face inference API shape.

use crate::adapters::model_loader::WarmUp;
use crate::domain::model::{ClassificationResult, TokenEntity};
use crate::domain::ports::{TextClassifier, TokenClassifier};
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const WARM_UP_TEXT: &str = "This agreement is entered into between the parties.";

#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl InferenceClient {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model_id)
    }

    async fn infer(&self, model_id: &str, payload: &Value) -> Result<Value> {
        let mut request = self.client.post(self.model_url(model_id)).json(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::UpstreamStatus {
                service: model_id.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawClassification {
    Nested(Vec<Vec<RawLabel>>),
    Flat(Vec<RawLabel>),
}

#[derive(Debug, Deserialize)]
struct RawToken {
    entity: String,
    word: String,
    score: f64,
    start: usize,
    end: usize,
}

/// Top-scoring label from `[[{label, score}]]` or `[{label, score}]`.
pub fn parse_text_classification(value: Value) -> Result<ClassificationResult> {
    let raw: RawClassification = serde_json::from_value(value)
        .map_err(|e| PipelineError::inference(format!("unexpected classification payload: {}", e)))?;

    let labels = match raw {
        RawClassification::Nested(nested) => nested.into_iter().next().unwrap_or_default(),
        RawClassification::Flat(flat) => flat,
    };

    labels
        .into_iter()
        .fold(None::<RawLabel>, |best, candidate| match best {
            Some(b) if b.score >= candidate.score => Some(b),
            _ => Some(candidate),
        })
        .map(|best| ClassificationResult::new(best.label, best.score))
        .ok_or_else(|| PipelineError::inference("empty classification result"))
}

/// Per-token `[{entity, score, word, start, end}]`. Aggregated `entity_group`
/// payloads are rejected.
pub fn parse_token_classification(value: Value) -> Result<Vec<TokenEntity>> {
    let raw: Vec<RawToken> = serde_json::from_value(value)
        .map_err(|e| PipelineError::inference(format!("unexpected NER payload: {}", e)))?;

    Ok(raw
        .into_iter()
        .map(|token| TokenEntity {
            label: token.entity,
            word: token.word,
            score: token.score,
            start: token.start,
            end: token.end,
        })
        .collect())
}

fn text_payload(text: &str) -> Value {
    json!({ "inputs": text })
}

/// 關閉伺服端合併，保留逐 token 預測
fn token_payload(text: &str) -> Value {
    json!({
        "inputs": text,
        "parameters": { "aggregation_strategy": "none" }
    })
}

#[derive(Debug, Clone)]
pub struct HubTextClassifier {
    client: InferenceClient,
    model_id: String,
}

impl HubTextClassifier {
    pub fn new(client: InferenceClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl TextClassifier for HubTextClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let value = self.client.infer(&self.model_id, &text_payload(text)).await?;
        parse_text_classification(value)
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl WarmUp for HubTextClassifier {
    async fn warm_up(&self) -> Result<()> {
        self.classify(WARM_UP_TEXT).await.map(|_| ())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[derive(Debug, Clone)]
pub struct HubTokenClassifier {
    client: InferenceClient,
    model_id: String,
}

impl HubTokenClassifier {
    pub fn new(client: InferenceClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl TokenClassifier for HubTokenClassifier {
    async fn recognize(&self, text: &str) -> Result<Vec<TokenEntity>> {
        let value = self.client.infer(&self.model_id, &token_payload(text)).await?;
        parse_token_classification(value)
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl WarmUp for HubTokenClassifier {
    async fn warm_up(&self) -> Result<()> {
        self.recognize(WARM_UP_TEXT).await.map(|_| ())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
