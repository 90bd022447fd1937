//! Score aggregation over records.
//!
//! Scores are derived on demand and never stored. Every aggregate is the
//! arithmetic mean of the record scores in scope, or 0.0 for an empty scope.

use super::criteria::{Criterion, Standard};
use super::record::{Record, MAX_SCORE};
use super::store::RecordStore;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Total, required-only and optional-only means on the 0-10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub total: f64,
    pub required: f64,
    pub optional: f64,
}

impl Score {
    /// Aggregate an arbitrary set of records.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        standard: &Standard,
    ) -> Self {
        let mut total = Mean::default();
        let mut required = Mean::default();
        let mut optional = Mean::default();

        for record in records {
            total.add(record.score());
            if standard.is_required(record.criterion()) {
                required.add(record.score());
            } else {
                optional.add(record.score());
            }
        }

        Self {
            total: total.value(),
            required: required.value(),
            optional: optional.value(),
        }
    }

    /// Whole-document score.
    pub fn for_document(store: &RecordStore, standard: &Standard) -> Self {
        Self::from_records(store.iter(), standard)
    }

    /// Score of every record for one entity.
    pub fn for_entity(store: &RecordStore, standard: &Standard, entity_id: &str) -> Self {
        Self::from_records(store.records_for_entity(entity_id), standard)
    }

    /// Score of the single record for `(criterion, entity_id)`, 0.0 if absent.
    #[must_use]
    pub fn for_record(store: &RecordStore, criterion: Criterion, entity_id: &str) -> f64 {
        store
            .record(criterion, entity_id)
            .map_or(0.0, Record::score)
    }
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Report-facing projection of the document score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub max_score: f64,
    pub total_score: f64,
    pub total_required_score: f64,
    pub total_optional_score: f64,
}

impl From<Score> for Summary {
    fn from(score: Score) -> Self {
        Self {
            max_score: MAX_SCORE,
            total_score: score.total,
            total_required_score: score.required,
            total_optional_score: score.optional,
        }
    }
}

impl Summary {
    pub fn for_document(store: &RecordStore, standard: &Standard) -> Self {
        Score::for_document(store, standard).into()
    }
}
