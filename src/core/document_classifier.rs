use crate::adapters::model_loader::ModelLoad;
use crate::domain::model::{ClassificationResult, DocumentClassification};
use crate::domain::ports::{AnalysisService, TextClassifier};
use crate::utils::error::{PipelineError, Result};
use crate::utils::text::{text_length, word_count};
use async_trait::async_trait;

pub const KEYWORD_METHOD: &str = "keyword_matching";
pub const MODEL_METHOD: &str = "model";

/// Category vocabularies, in tie-break order.
pub const DOCUMENT_CATEGORIES: [(&str, &[&str]); 5] = [
    (
        "contract",
        &["agreement", "contract", "terms", "conditions", "parties"],
    ),
    (
        "employment",
        &["employee", "employer", "salary", "job", "work", "employment"],
    ),
    (
        "lease",
        &["lease", "rent", "tenant", "landlord", "property", "rental"],
    ),
    (
        "nda",
        &["confidential", "non-disclosure", "secret", "proprietary", "nda"],
    ),
    (
        "service",
        &["service", "consulting", "professional", "client", "deliverable"],
    ),
];

/// Keyword-frequency document classifier.
///
/// Each category scores `matched / vocabulary size`, where a keyword matches if
/// it occurs anywhere in the lowercased text. The highest score wins; on a tie
/// the category listed first in [`DOCUMENT_CATEGORIES`] wins.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn scores(&self, text: &str) -> Vec<(&'static str, f64)> {
        let text_lower = text.to_lowercase();

        DOCUMENT_CATEGORIES
            .iter()
            .map(|(category, keywords)| {
                let matched = keywords
                    .iter()
                    .filter(|keyword| text_lower.contains(*keyword))
                    .count();
                (*category, matched as f64 / keywords.len() as f64)
            })
            .collect()
    }

    pub fn best_match(&self, text: &str) -> ClassificationResult {
        let mut best = ("contract", f64::MIN);
        for (category, score) in self.scores(text) {
            // 只有嚴格大於才替換，保證平手時取第一個
            if score > best.1 {
                best = (category, score);
            }
        }
        ClassificationResult::new(best.0, best.1)
    }
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.best_match(text))
    }

    fn name(&self) -> &str {
        KEYWORD_METHOD
    }
}

pub struct DocumentClassifier {
    model: ModelLoad<dyn TextClassifier>,
}

impl DocumentClassifier {
    pub fn new(model: ModelLoad<dyn TextClassifier>) -> Self {
        Self { model }
    }

    /// Service backed by the keyword heuristic only.
    pub fn keyword() -> Self {
        Self::new(ModelLoad::heuristic(std::sync::Arc::new(KeywordClassifier::new())))
    }

    pub fn model(&self) -> &ModelLoad<dyn TextClassifier> {
        &self.model
    }

    pub async fn classify(&self, text: &str) -> Result<DocumentClassification> {
        let backend = self.model.backend().ok_or(PipelineError::ModelUnavailable)?;
        let result = backend.classify(text).await?;

        let method = if self.model.is_remote() {
            MODEL_METHOD
        } else {
            KEYWORD_METHOD
        };

        Ok(DocumentClassification {
            document_type: result.label,
            confidence: result.confidence,
            text_length: text_length(text),
            word_count: word_count(text),
            method: method.to_string(),
        })
    }
}

#[async_trait]
impl AnalysisService for DocumentClassifier {
    type Output = DocumentClassification;

    fn service_name(&self) -> &'static str {
        "Document Classifier"
    }

    fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    fn failure_context(&self) -> &'static str {
        "Classification failed"
    }

    async fn process(&self, text: &str) -> Result<DocumentClassification> {
        self.classify(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_wins_on_its_own_vocabulary() {
        let classifier = KeywordClassifier::new();
        for (category, keywords) in DOCUMENT_CATEGORIES {
            let text = keywords.join(" ");
            let result = classifier.best_match(&text);
            assert_eq!(result.label, category, "text: {}", text);
            assert_eq!(result.confidence, 1.0);
        }
    }

    #[test]
    fn confidence_is_matched_over_vocabulary_size() {
        let classifier = KeywordClassifier::new();
        let result = classifier.best_match("The tenant pays rent to the landlord");
        assert_eq!(result.label, "lease");
        assert_eq!(result.confidence, 3.0 / 6.0);
    }

    #[test]
    fn ties_resolve_to_first_category() {
        let classifier = KeywordClassifier::new();

        // 沒有任何關鍵字：全部為 0，取 contract
        let result = classifier.best_match("hello world");
        assert_eq!(result.label, "contract");
        assert_eq!(result.confidence, 0.0);

        // agreement (1/5) 對 confidential (1/5)
        let result = classifier.best_match("agreement kept confidential");
        assert_eq!(result.label, "contract");
    }

    #[tokio::test]
    async fn keyword_service_reports_lengths_and_method() {
        let service = DocumentClassifier::keyword();
        let result = service
            .classify("Employee salary is paid monthly")
            .await
            .unwrap();

        assert_eq!(result.document_type, "employment");
        assert_eq!(result.text_length, 31);
        assert_eq!(result.word_count, 5);
        assert_eq!(result.method, KEYWORD_METHOD);
        assert!(service.model_loaded());
    }

    #[tokio::test]
    async fn unavailable_model_yields_model_not_loaded() {
        let service = DocumentClassifier::new(ModelLoad::Unavailable {
            reason: "probe failed".to_string(),
        });
        let err = service.classify("some text").await.unwrap_err();
        assert!(matches!(err, PipelineError::ModelUnavailable));
        assert!(!service.model_loaded());
    }
}
