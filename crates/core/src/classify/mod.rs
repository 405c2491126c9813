pub mod error;
pub mod hf;

use crate::domain::sentiment::SentimentResult;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModelLabel {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelScore {
    pub label: ModelLabel,
    pub confidence: f64,
}

#[async_trait::async_trait]
pub trait SentimentModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<ModelScore>;
}

/// Maps a two-class model score onto the signed [-1, 1] scale; blank input
/// scores NEUTRAL without a model call.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn SentimentModel>,
}

impl Classifier {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn classify(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().is_empty() {
            return Ok(SentimentResult::neutral());
        }

        let score = self.model.classify(text).await?;
        anyhow::ensure!(
            (0.0..=1.0).contains(&score.confidence),
            "model confidence must be within [0, 1], got {}",
            score.confidence
        );

        Ok(match score.label {
            ModelLabel::Positive => SentimentResult::positive(score.confidence),
            ModelLabel::Negative => SentimentResult::negative(score.confidence),
        })
    }
}
