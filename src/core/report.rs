use crate::domain::model::NlpResults;
use serde_json::Value;

pub const SYSTEM_PROMPT: &str = "You are an expert legal AI assistant specializing in Indian law. \
Provide comprehensive, accurate, and actionable legal analysis.";

fn field_str<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

fn field_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn field_u64(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// `0.4567` → `"45.7%"`
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// User prompt sent to the chat-completion model.
pub fn build_legal_context(nlp: &NlpResults, original_text: &str, analysis_type: &str) -> String {
    let doc_class = &nlp.document_classification;
    let entities = &nlp.entity_recognition;
    let clauses = &nlp.clause_analysis;

    let entity_types = entities
        .get("entity_types")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let key_entities = entities
        .get("entities")
        .map(|e| serde_json::to_string_pretty(e).unwrap_or_else(|_| e.to_string()))
        .unwrap_or_else(|| "{}".to_string());

    let risk_summary = clauses
        .get("risk_summary")
        .map(Value::to_string)
        .unwrap_or_else(|| "{}".to_string());

    format!(
        r#"
LEGAL DOCUMENT ANALYSIS REQUEST

ORIGINAL TEXT:
{original_text}

NLP ANALYSIS RESULTS:

1. DOCUMENT CLASSIFICATION:
- Type: {doc_type}
- Confidence: {confidence}
- Text Length: {text_length} characters

2. ENTITY RECOGNITION:
- Total Entities: {total_entities}
- Entity Types: {entity_types}
- Key Entities: {key_entities}

3. CLAUSE ANALYSIS:
- Total Clauses: {total_clauses}
- Risk Summary: {risk_summary}
- Overall Risk: {overall_risk}

ANALYSIS TYPE REQUESTED: {analysis_type}

INSTRUCTIONS:
Based on the above NLP analysis and original text, provide a comprehensive legal analysis focusing on:

1. Document Classification & Type
2. Key Legal Entities & Parties
3. Risk Assessment & Compliance Issues
4. Indian Legal Framework Compliance
5. Recommendations & Next Steps

Please provide:
- Clear, actionable insights
- Specific references to Indian laws where applicable
- Risk mitigation strategies
- Compliance recommendations
- Professional legal language suitable for lawyers

Focus on Indian legal system requirements and best practices.
"#,
        doc_type = field_str(doc_class, "document_type", "Unknown"),
        confidence = percent(field_f64(doc_class, "confidence")),
        text_length = field_u64(doc_class, "text_length"),
        total_entities = field_u64(entities, "total_entities"),
        total_clauses = field_u64(clauses, "total_clauses"),
        overall_risk = field_str(clauses, "overall_risk", "Unknown"),
    )
}

pub fn nlp_error_report(errors: &[String]) -> String {
    format!("❌ NLP Analysis Errors: {}", errors.join("; "))
}

pub fn llm_error_report(message: &str) -> String {
    format!("❌ LLM Analysis Error: {}", message)
}

pub fn format_report(
    nlp: &NlpResults,
    analysis_type: &str,
    llm_analysis: &str,
    llm_description: &str,
) -> String {
    let doc_class = &nlp.document_classification;

    format!(
        r#"
# ⚖️ Legal AI Analysis Report

## 📊 Analysis Summary
- **Type**: {analysis_type}
- **Document Type**: {doc_type}
- **Confidence**: {confidence}
- **Entities**: {total_entities} identified
- **Overall Risk**: {overall_risk}

## 🤖 AI Legal Analysis
{llm_analysis}

## 🔍 Technical Details
- **NLP Pipeline**: Multi-Service Architecture
- **LLM**: {llm_description}
- **Architecture**: Hybrid AI System
- **Focus**: Indian Legal Framework

---
*Generated by Legal AI Pipeline - Multi-Service NLP + LLM System*
"#,
        doc_type = field_str(doc_class, "document_type", "Unknown"),
        confidence = percent(field_f64(doc_class, "confidence")),
        total_entities = field_u64(&nlp.entity_recognition, "total_entities"),
        overall_risk = field_str(&nlp.clause_analysis, "overall_risk", "Unknown"),
    )
}
