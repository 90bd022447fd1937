//! Per-document collection of check records.

use super::criteria::Criterion;
use super::record::Record;
use indexmap::IndexMap;

/// All records produced for one document, keyed by (criterion, entity id).
///
/// Holds at most one record per key. Inserting an existing key replaces the
/// record in place, so iteration order stays the order of first insertion.
/// Secondary indexes hold positions into `records`; records are never
/// removed, so positions stay valid.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: IndexMap<(Criterion, String), Record>,
    by_entity: IndexMap<String, Vec<usize>>,
    by_criterion: IndexMap<Criterion, Vec<usize>>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous one for the same key.
    pub fn insert(&mut self, record: Record) {
        let criterion = record.criterion();
        let entity_id = record.entity_id().to_string();
        let (index, previous) = self
            .records
            .insert_full((criterion, entity_id.clone()), record);
        match previous {
            Some(previous) => tracing::debug!(
                "Replaced record for {} on {} (previous score {:.1})",
                previous.criterion(),
                previous.entity_id(),
                previous.score()
            ),
            None => {
                self.by_entity.entry(entity_id).or_default().push(index);
                self.by_criterion.entry(criterion).or_default().push(index);
            }
        }
    }

    fn resolve_positions(&self, positions: Option<&[usize]>) -> Vec<&Record> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&i| self.records.get_index(i).map(|(_, record)| record))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Distinct entity ids, first-seen order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<&str> {
        self.by_entity.keys().map(String::as_str).collect()
    }

    /// Records of one entity, in insertion order.
    #[must_use]
    pub fn records_for_entity(&self, entity_id: &str) -> Vec<&Record> {
        self.resolve_positions(self.by_entity.get(entity_id).map(Vec::as_slice))
    }

    /// Records of one criterion, in insertion order.
    #[must_use]
    pub fn records_for_criterion(&self, criterion: Criterion) -> Vec<&Record> {
        self.resolve_positions(self.by_criterion.get(&criterion).map(Vec::as_slice))
    }

    #[must_use]
    pub fn record(&self, criterion: Criterion, entity_id: &str) -> Option<&Record> {
        self.records.get(&(criterion, entity_id.to_string()))
    }
}

impl Extend<Record> for RecordStore {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = indexmap::map::Values<'a, (Criterion, String), Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
