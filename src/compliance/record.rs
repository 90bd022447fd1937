//! A single check outcome.

use super::criteria::Criterion;
use serde::Serialize;

/// Entity id used for document-level records.
pub const DOC_ENTITY_ID: &str = "doc";

/// Upper bound of every score.
pub const MAX_SCORE: f64 = 10.0;

/// Result of evaluating one criterion against one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    criterion: Criterion,
    entity_id: String,
    score: f64,
    result: String,
}

impl Record {
    /// Create a record. The score is clamped to `[0, MAX_SCORE]`; NaN becomes 0.
    pub fn new(
        criterion: Criterion,
        entity_id: impl Into<String>,
        score: f64,
        result: impl Into<String>,
    ) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, MAX_SCORE)
        };
        Self {
            criterion,
            entity_id: entity_id.into(),
            score,
            result: result.into(),
        }
    }

    /// Document-level record.
    pub fn for_document(criterion: Criterion, score: f64, result: impl Into<String>) -> Self {
        Self::new(criterion, DOC_ENTITY_ID, score, result)
    }

    #[must_use]
    pub const fn criterion(&self) -> Criterion {
        self.criterion
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[must_use]
    pub fn is_document_level(&self) -> bool {
        self.entity_id == DOC_ENTITY_ID
    }
}
