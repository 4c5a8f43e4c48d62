use crate::domain::model::{ClassificationResult, TokenEntity};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Sequence classification: one text in, top label out.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Identifier reported in logs, e.g. a model id or `"keyword_matching"`.
    fn name(&self) -> &str;
}

/// Token classification. Predictions are returned per token, unmerged.
#[async_trait]
pub trait TokenClassifier: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<TokenEntity>>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    fn describe(&self) -> String;
}

/// One NLP component as exposed over HTTP: a single-text operation plus the
/// bits the health endpoint reports.
#[async_trait]
pub trait AnalysisService: Send + Sync + 'static {
    type Output: Serialize + Send;

    fn service_name(&self) -> &'static str;

    fn model_loaded(&self) -> bool;

    /// Prefix for failure messages, e.g. `"Classification failed"`.
    fn failure_context(&self) -> &'static str;

    async fn process(&self, text: &str) -> Result<Self::Output>;
}
