use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Top label returned by a text-classification backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// One raw token-level prediction from a token-classification backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEntity {
    pub label: String,
    pub word: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Document-level verdict. `Unknown` only when no clause survived filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    Low,
    Medium,
    High,
    Unknown,
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverallRisk::Low => "Low",
            OverallRisk::Medium => "Medium",
            OverallRisk::High => "High",
            OverallRisk::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub text: String,
    pub classification: String,
    pub confidence: f64,
    pub risk_level: RiskTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

impl RiskSummary {
    pub fn from_clauses(clauses: &[Clause]) -> Self {
        clauses.iter().fold(Self::default(), |mut acc, clause| {
            match clause.risk_level {
                RiskTier::High => acc.high_risk += 1,
                RiskTier::Medium => acc.medium_risk += 1,
                RiskTier::Low => acc.low_risk += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.high_risk + self.medium_risk + self.low_risk
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    pub clauses: Vec<Clause>,
    pub total_clauses: usize,
    pub risk_summary: RiskSummary,
    pub overall_risk: OverallRisk,
    pub text_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentClassification {
    pub document_type: String,
    pub confidence: f64,
    pub text_length: usize,
    pub word_count: usize,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub confidence: f64,
    pub start: usize,
    pub end: usize,
}

impl From<TokenEntity> for EntityMention {
    fn from(token: TokenEntity) -> Self {
        Self {
            text: token.word,
            confidence: token.score,
            start: token.start,
            end: token.end,
        }
    }
}

/// Label → mentions, kept in the order each label was first seen.
///
/// Serialized as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityGroups {
    groups: Vec<(String, Vec<EntityMention>)>,
}

impl EntityGroups {
    pub fn push(&mut self, label: &str, mention: EntityMention) {
        match self.groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, mentions)) => mentions.push(mention),
            None => self.groups.push((label.to_string(), vec![mention])),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.groups.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&[EntityMention]> {
        self.groups
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m.as_slice())
    }
}

impl Serialize for EntityGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (label, mentions) in &self.groups {
            map.serialize_entry(label, mentions)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityExtraction {
    pub entities: EntityGroups,
    pub total_entities: usize,
    pub entity_types: Vec<String>,
    pub text_length: usize,
}

/// Combined view of the three sub-services. Each field holds the raw JSON body
/// (possibly an `{"error": ...}` object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpResults {
    pub document_classification: serde_json::Value,
    pub entity_recognition: serde_json::Value,
    pub clause_analysis: serde_json::Value,
    pub text_length: usize,
    pub word_count: usize,
}

impl NlpResults {
    /// `"<service>: <message>"` for every sub-result carrying an `error` field.
    pub fn errors(&self) -> Vec<String> {
        [
            ("document_classification", &self.document_classification),
            ("entity_recognition", &self.entity_recognition),
            ("clause_analysis", &self.clause_analysis),
        ]
        .into_iter()
        .filter_map(|(service, result)| {
            result.get("error").map(|err| {
                let message = err
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                format!("{}: {}", service, message)
            })
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn running(service: impl Into<String>, model_loaded: bool) -> Self {
        Self {
            service: service.into(),
            status: "running".to_string(),
            model_loaded,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchRequest {
    pub texts: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub analysis_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}
