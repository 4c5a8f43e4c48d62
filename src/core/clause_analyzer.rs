use crate::adapters::model_loader::ModelLoad;
use crate::domain::model::{Clause, ClauseAnalysis, OverallRisk, RiskSummary, RiskTier};
use crate::domain::ports::{AnalysisService, TextClassifier};
use crate::utils::error::{PipelineError, Result};
use crate::utils::text::text_length;
use async_trait::async_trait;

/// Labels that mark a clause as inherently risky.
pub const RISK_KEYWORDS: [&str; 6] = [
    "termination",
    "penalty",
    "liability",
    "indemnity",
    "breach",
    "damages",
];

const CLAUSE_DELIMITER: &str = ". ";
const MIN_CLAUSE_CHARS: usize = 10;

/// Naive period-space split. Abbreviations and decimals split too.
pub fn split_clauses(text: &str) -> Vec<&str> {
    text.split(CLAUSE_DELIMITER).collect()
}

/// Trimmed fragments longer than ten characters.
pub fn candidate_clauses(text: &str) -> Vec<&str> {
    split_clauses(text)
        .into_iter()
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > MIN_CLAUSE_CHARS)
        .collect()
}

pub fn assess_risk(label: &str, confidence: f64) -> RiskTier {
    let label_lower = label.to_lowercase();

    if RISK_KEYWORDS.iter().any(|k| label_lower.contains(k)) {
        if confidence > 0.7 {
            RiskTier::High
        } else {
            RiskTier::Medium
        }
    } else if confidence > 0.8 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub fn overall_risk(summary: &RiskSummary) -> OverallRisk {
    let total = summary.total();
    if total == 0 {
        return OverallRisk::Unknown;
    }

    let total = total as f64;
    if summary.high_risk as f64 > total * 0.3 {
        OverallRisk::High
    } else if summary.high_risk > 0 || summary.medium_risk as f64 > total * 0.5 {
        OverallRisk::Medium
    } else {
        OverallRisk::Low
    }
}

pub struct ClauseAnalyzer {
    model: ModelLoad<dyn TextClassifier>,
}

impl ClauseAnalyzer {
    pub fn new(model: ModelLoad<dyn TextClassifier>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelLoad<dyn TextClassifier> {
        &self.model
    }

    pub async fn analyze(&self, text: &str) -> Result<ClauseAnalysis> {
        let backend = self.model.backend().ok_or(PipelineError::ModelUnavailable)?;

        let mut clauses = Vec::new();
        for fragment in candidate_clauses(text) {
            let result = backend.classify(fragment).await?;
            clauses.push(Clause {
                text: fragment.to_string(),
                risk_level: assess_risk(&result.label, result.confidence),
                classification: result.label,
                confidence: result.confidence,
            });
        }

        let risk_summary = RiskSummary::from_clauses(&clauses);
        let overall = overall_risk(&risk_summary);
        tracing::debug!(
            "Analysed {} clauses: {:?}, overall {}",
            clauses.len(),
            risk_summary,
            overall
        );

        Ok(ClauseAnalysis {
            total_clauses: clauses.len(),
            clauses,
            risk_summary,
            overall_risk: overall,
            text_length: text_length(text),
        })
    }
}

#[async_trait]
impl AnalysisService for ClauseAnalyzer {
    type Output = ClauseAnalysis;

    fn service_name(&self) -> &'static str {
        "Clause Analyzer"
    }

    fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    fn failure_context(&self) -> &'static str {
        "Clause analysis failed"
    }

    async fn process(&self, text: &str) -> Result<ClauseAnalysis> {
        self.analyze(text).await
    }
}
