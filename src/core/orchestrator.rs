use crate::adapters::azure_openai::AzureOpenAiClient;
use crate::adapters::nlp_client::NlpServiceClient;
use crate::config::OrchestratorConfig;
use crate::core::report::{
    build_legal_context, format_report, llm_error_report, nlp_error_report, SYSTEM_PROMPT,
};
use crate::domain::model::NlpResults;
use crate::domain::ports::ChatCompletion;
use crate::utils::error::{PipelineError, Result};
use crate::utils::text::{text_length, word_count};
use std::sync::Arc;

/// Sub-service endpoints called by the orchestrator.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub doc_classifier: String,
    pub entity_recognizer: String,
    pub clause_analyzer: String,
}

impl From<&OrchestratorConfig> for ServiceUrls {
    fn from(config: &OrchestratorConfig) -> Self {
        Self {
            doc_classifier: config.doc_classifier_url.clone(),
            entity_recognizer: config.entity_recognizer_url.clone(),
            clause_analyzer: config.clause_analyzer_url.clone(),
        }
    }
}

/// NLP services → prompt → chat completion → Markdown report.
pub struct LegalAnalysisPipeline {
    urls: ServiceUrls,
    nlp: NlpServiceClient,
    llm: Arc<dyn ChatCompletion>,
}

impl LegalAnalysisPipeline {
    pub fn new(urls: ServiceUrls, nlp: NlpServiceClient, llm: Arc<dyn ChatCompletion>) -> Self {
        Self { urls, nlp, llm }
    }

    pub fn from_config(config: &OrchestratorConfig) -> Result<Self> {
        let nlp = NlpServiceClient::new(config.service_timeout())?;
        let llm = AzureOpenAiClient::from_config(config)?;

        tracing::info!("✅ Legal AI Pipeline initialized successfully");
        tracing::info!("🔗 Doc Classifier: {}", config.doc_classifier_url);
        tracing::info!("🔗 Entity Recognizer: {}", config.entity_recognizer_url);
        tracing::info!("🔗 Clause Analyzer: {}", config.clause_analyzer_url);
        tracing::info!("🔗 LLM: {}", llm.describe());

        Ok(Self::new(ServiceUrls::from(config), nlp, Arc::new(llm)))
    }

    /// Calls the three sub-services concurrently and collects their bodies.
    pub async fn run_nlp_analysis(&self, text: &str) -> NlpResults {
        tracing::info!("🔍 Running complete NLP analysis...");

        let (document_classification, entity_recognition, clause_analysis) = tokio::join!(
            self.nlp.call(&self.urls.doc_classifier, "classify", text),
            self.nlp.call(&self.urls.entity_recognizer, "extract", text),
            self.nlp.call(&self.urls.clause_analyzer, "analyze", text),
        );

        NlpResults {
            document_classification,
            entity_recognition,
            clause_analysis,
            text_length: text_length(text),
            word_count: word_count(text),
        }
    }

    async fn call_llm(&self, nlp: &NlpResults, text: &str, analysis_type: &str) -> Result<String> {
        tracing::info!("🤖 Calling {}...", self.llm.describe());
        let context = build_legal_context(nlp, text, analysis_type);
        self.llm.complete(SYSTEM_PROMPT, &context).await
    }

    fn describe_llm_error(&self, error: &PipelineError) -> String {
        match error {
            PipelineError::UpstreamStatus { status, .. } => format!(
                "Error: {} API call failed with status {}",
                self.llm.describe(),
                status
            ),
            other => format!("Error: {} call failed: {}", self.llm.describe(), other),
        }
    }

    /// Full pipeline. Always returns a report; failures are rendered inline.
    pub async fn analyze(&self, text: &str, analysis_type: &str) -> String {
        tracing::info!("🚀 Starting legal analysis pipeline for: {}", analysis_type);

        let nlp = self.run_nlp_analysis(text).await;

        let errors = nlp.errors();
        if !errors.is_empty() {
            tracing::warn!("NLP analysis reported {} error(s), skipping LLM", errors.len());
            return nlp_error_report(&errors);
        }

        let llm_analysis = match self.call_llm(&nlp, text, analysis_type).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("❌ Error calling {}: {}", self.llm.describe(), e);
                return llm_error_report(&self.describe_llm_error(&e));
            }
        };

        tracing::info!("✅ Legal analysis pipeline completed successfully");
        format_report(&nlp, analysis_type, &llm_analysis, &self.llm.describe())
    }
}
