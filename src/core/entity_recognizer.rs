use crate::adapters::model_loader::ModelLoad;
use crate::domain::model::{EntityExtraction, EntityGroups, EntityMention, TokenEntity};
use crate::domain::ports::{AnalysisService, TokenClassifier};
use crate::utils::error::{PipelineError, Result};
use crate::utils::text::text_length;
use async_trait::async_trait;

/// Groups raw token predictions by label. Adjacent tokens of the same entity
/// are not merged.
pub fn group_entities(tokens: Vec<TokenEntity>) -> EntityGroups {
    let mut groups = EntityGroups::default();
    for token in tokens {
        let label = token.label.clone();
        groups.push(&label, EntityMention::from(token));
    }
    groups
}

pub struct EntityRecognizer {
    model: ModelLoad<dyn TokenClassifier>,
}

impl EntityRecognizer {
    pub fn new(model: ModelLoad<dyn TokenClassifier>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelLoad<dyn TokenClassifier> {
        &self.model
    }

    pub async fn extract(&self, text: &str) -> Result<EntityExtraction> {
        let backend = self.model.backend().ok_or(PipelineError::ModelUnavailable)?;
        let tokens = backend.recognize(text).await?;
        let total_entities = tokens.len();

        tracing::debug!(
            "{} returned {} token predictions",
            backend.name(),
            total_entities
        );

        let entities = group_entities(tokens);
        Ok(EntityExtraction {
            entity_types: entities.labels(),
            entities,
            total_entities,
            text_length: text_length(text),
        })
    }
}

#[async_trait]
impl AnalysisService for EntityRecognizer {
    type Output = EntityExtraction;

    fn service_name(&self) -> &'static str {
        "Entity Recognizer"
    }

    fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    fn failure_context(&self) -> &'static str {
        "Entity extraction failed"
    }

    async fn process(&self, text: &str) -> Result<EntityExtraction> {
        self.extract(text).await
    }
}
