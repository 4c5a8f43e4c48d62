pub mod clause_analyzer;
pub mod document_classifier;
pub mod entity_recognizer;
pub mod orchestrator;
pub mod report;
pub mod service;
pub mod suite;

pub use crate::domain::model::{ClauseAnalysis, DocumentClassification, EntityExtraction, NlpResults};
pub use crate::domain::ports::{AnalysisService, ChatCompletion, TextClassifier, TokenClassifier};
pub use crate::utils::error::Result;
