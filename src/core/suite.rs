use crate::core::clause_analyzer::ClauseAnalyzer;
use crate::core::document_classifier::DocumentClassifier;
use crate::core::entity_recognizer::EntityRecognizer;
use crate::core::service::process_to_value;
use crate::domain::model::NlpResults;
use crate::utils::text::{text_length, word_count};
use std::sync::Arc;

pub const SUITE_SERVICE_NAME: &str = "Legal NLP Services";

/// All three components in one process.
#[derive(Clone)]
pub struct NlpSuite {
    pub classifier: Arc<DocumentClassifier>,
    pub recognizer: Arc<EntityRecognizer>,
    pub analyzer: Arc<ClauseAnalyzer>,
}

impl NlpSuite {
    pub fn new(
        classifier: DocumentClassifier,
        recognizer: EntityRecognizer,
        analyzer: ClauseAnalyzer,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            recognizer: Arc::new(recognizer),
            analyzer: Arc::new(analyzer),
        }
    }

    pub fn models_loaded(&self) -> bool {
        self.classifier.model().is_loaded()
            && self.recognizer.model().is_loaded()
            && self.analyzer.model().is_loaded()
    }

    /// Same shape the orchestrator assembles from the remote services.
    pub async fn analyze_all(&self, text: &str) -> NlpResults {
        let (document_classification, entity_recognition, clause_analysis) = tokio::join!(
            process_to_value(self.classifier.as_ref(), text),
            process_to_value(self.recognizer.as_ref(), text),
            process_to_value(self.analyzer.as_ref(), text),
        );

        NlpResults {
            document_classification,
            entity_recognition,
            clause_analysis,
            text_length: text_length(text),
            word_count: word_count(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lexicon::{LexiconClauseClassifier, PatternEntityRecognizer};
    use crate::adapters::model_loader::ModelLoad;

    fn suite() -> NlpSuite {
        NlpSuite::new(
            DocumentClassifier::keyword(),
            EntityRecognizer::new(ModelLoad::heuristic(Arc::new(
                PatternEntityRecognizer::new().unwrap(),
            ))),
            ClauseAnalyzer::new(ModelLoad::heuristic(Arc::new(LexiconClauseClassifier::new()))),
        )
    }

    #[tokio::test]
    async fn analyze_all_combines_the_three_components() {
        let text = "This employment agreement is entered into between ABC Corporation and \
                    Mr. John Smith, residing at Mumbai. The employer may terminate the \
                    employment for breach of the terms with liquidated damages as penalty.";
        let results = suite().analyze_all(text).await;

        assert!(results.errors().is_empty());
        // agreement + terms (2/5) 勝過 employer + employment (2/6)
        assert_eq!(results.document_classification["document_type"], "contract");
        assert_eq!(results.document_classification["confidence"], 0.4);
        assert_eq!(results.entity_recognition["total_entities"], 5);
        // "Mr. John" 也會被切開
        assert_eq!(results.clause_analysis["total_clauses"], 3);
        assert_eq!(results.word_count, text.split_whitespace().count());
    }

    #[tokio::test]
    async fn unavailable_component_reports_error_in_place() {
        let mut suite = suite();
        suite.analyzer = Arc::new(ClauseAnalyzer::new(ModelLoad::Unavailable {
            reason: "offline".to_string(),
        }));

        assert!(!suite.models_loaded());
        let results = suite.analyze_all("A lease between landlord and tenant.").await;
        assert_eq!(results.clause_analysis["error"], "Model not loaded");
        assert_eq!(results.errors(), vec!["clause_analysis: Model not loaded"]);
    }
}
