//! Local heuristic backends used when no inference endpoint is available.

use crate::domain::model::{ClassificationResult, TokenEntity};
use crate::domain::ports::{TextClassifier, TokenClassifier};
use crate::utils::error::{PipelineError, Result};
use crate::utils::text::char_offset;
use async_trait::async_trait;
use regex::Regex;

pub const GENERAL_LABEL: &str = "general";
const GENERAL_CONFIDENCE: f64 = 0.5;

/// Clause label → cue phrases, in tie-break order.
const CLAUSE_LEXICON: [(&str, &[&str]); 10] = [
    (
        "termination",
        &["terminate", "termination", "notice period", "expiry", "cancel"],
    ),
    ("indemnity", &["indemnify", "indemnity", "hold harmless"]),
    ("liability", &["liable", "liability", "limitation of liability"]),
    ("penalty", &["penalty", "liquidated damages", "late fee", "forfeit"]),
    ("breach", &["breach", "default", "violation"]),
    ("damages", &["damages", "compensation", "loss"]),
    (
        "confidentiality",
        &["confidential", "non-disclosure", "proprietary", "secret"],
    ),
    ("payment", &["payment", "salary", "invoice", "fee", "₹", "rent"]),
    (
        "dispute_resolution",
        &["arbitration", "dispute", "jurisdiction", "court"],
    ),
    ("governing_law", &["governed by", "governing law", "laws of"]),
];

/// Confidence grows with the number of distinct cues matched.
fn cue_confidence(hits: usize) -> f64 {
    match hits {
        0 => GENERAL_CONFIDENCE,
        1 => 0.68,
        2 => 0.82,
        _ => 0.93,
    }
}

/// Labels a clause by the lexicon entry with the most cue hits.
#[derive(Debug, Clone, Default)]
pub struct LexiconClauseClassifier;

impl LexiconClauseClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn label(&self, text: &str) -> ClassificationResult {
        let text_lower = text.to_lowercase();

        let mut best = (GENERAL_LABEL, 0usize);
        for (label, cues) in CLAUSE_LEXICON {
            let hits = cues.iter().filter(|cue| text_lower.contains(*cue)).count();
            if hits > best.1 {
                best = (label, hits);
            }
        }

        ClassificationResult::new(best.0, cue_confidence(best.1))
    }
}

#[async_trait]
impl TextClassifier for LexiconClauseClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.label(text))
    }

    fn name(&self) -> &str {
        "clause_lexicon"
    }
}

const LEADING_STOPWORDS: [&str; 7] = ["The", "This", "That", "Each", "Any", "Such", "Said"];

struct EntityPattern {
    kind: &'static str,
    score: f64,
    regex: Regex,
}

/// Regex and gazetteer entity recognizer.
///
/// Emits one prediction per word, `B-` on the first word of a span and `I-` on
/// the rest, mirroring token-level model output.
pub struct PatternEntityRecognizer {
    patterns: Vec<EntityPattern>,
    word: Regex,
}

impl PatternEntityRecognizer {
    pub fn new() -> Result<Self> {
        // 優先順序：PER > ORG > MISC > LOC，重疊時保留先命中者
        let specs: [(&str, f64, &str); 4] = [
            (
                "PER",
                0.91,
                r"\b(?:Mr|Mrs|Ms|Dr|Shri|Smt)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
            ),
            (
                "ORG",
                0.88,
                r"\b((?:[A-Z][A-Za-z&]*\s+){0,3}(?:Corporation|Company|Corp|Ltd|Limited|Inc|LLP|LLC|Bank|Pvt))\b",
            ),
            ("MISC", 0.8, r"\b((?:[A-Z][a-z]+\s+){1,6}Act),?\s+\d{4}"),
            (
                "LOC",
                0.95,
                r"\b(New Delhi|Delhi|Mumbai|Bangalore|Bengaluru|Chennai|Kolkata|Hyderabad|Pune|Ahmedabad|Maharashtra|Karnataka|Tamil Nadu|Kerala|Gujarat|India)\b",
            ),
        ];

        let patterns = specs
            .into_iter()
            .map(|(kind, score, pattern)| {
                Regex::new(pattern)
                    .map(|regex| EntityPattern { kind, score, regex })
                    .map_err(|e| PipelineError::ConfigError {
                        message: format!("invalid {} entity pattern: {}", kind, e),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let word = Regex::new(r"[^\s,;:]+").map_err(|e| PipelineError::ConfigError {
            message: format!("invalid word pattern: {}", e),
        })?;

        Ok(Self { patterns, word })
    }

    /// Non-overlapping `(kind, score, byte_start, byte_end)` spans sorted by start.
    fn spans(&self, text: &str) -> Vec<(&'static str, f64, usize, usize)> {
        let mut accepted: Vec<(&'static str, f64, usize, usize)> = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(m) = caps.get(1) else { continue };
                let overlaps = accepted
                    .iter()
                    .any(|&(_, _, start, end)| m.start() < end && start < m.end());
                if !overlaps {
                    accepted.push((pattern.kind, pattern.score, m.start(), m.end()));
                }
            }
        }

        accepted.sort_by_key(|&(_, _, start, _)| start);
        accepted
    }

    pub fn tokens(&self, text: &str) -> Vec<TokenEntity> {
        let mut tokens = Vec::new();

        for (kind, score, span_start, span_end) in self.spans(text) {
            let span = &text[span_start..span_end];
            let mut first = true;

            for word in self.word.find_iter(span) {
                let word_text = word.as_str().trim_end_matches('.');
                if first && LEADING_STOPWORDS.contains(&word_text) {
                    continue;
                }
                if word_text.is_empty() {
                    continue;
                }

                let byte_start = span_start + word.start();
                let byte_end = byte_start + word_text.len();
                let prefix = if first { "B" } else { "I" };
                first = false;

                tokens.push(TokenEntity {
                    label: format!("{}-{}", prefix, kind),
                    word: word_text.to_string(),
                    score,
                    start: char_offset(text, byte_start),
                    end: char_offset(text, byte_end),
                });
            }
        }

        tokens
    }
}

#[async_trait]
impl TokenClassifier for PatternEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<TokenEntity>> {
        Ok(self.tokens(text))
    }

    fn name(&self) -> &str {
        "entity_patterns"
    }
}
