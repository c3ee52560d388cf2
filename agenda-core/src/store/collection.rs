//! In-memory occurrence collection shared by the store implementations.

use std::collections::BTreeMap;

use crate::date_range::{DateRange, sort_by_start};
use crate::deletion::DeletionPlan;
use crate::occurrence::{NewOccurrence, Occurrence, OccurrenceId};

#[derive(Debug, Clone, Default)]
pub(crate) struct Collection {
    rows: BTreeMap<OccurrenceId, Occurrence>,
}

impl Collection {
    pub fn from_rows(rows: Vec<Occurrence>) -> Self {
        Collection {
            rows: rows.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }

    pub fn rows(&self) -> Vec<&Occurrence> {
        self.rows.values().collect()
    }

    pub fn overlapping(&self, range: &DateRange) -> Vec<Occurrence> {
        let mut found: Vec<Occurrence> = self
            .rows
            .values()
            .filter(|o| range.contains(o))
            .cloned()
            .collect();
        sort_by_start(&mut found);
        found
    }

    pub fn get(&self, id: &OccurrenceId) -> Option<Occurrence> {
        self.rows.get(id).cloned()
    }

    pub fn insert(&mut self, occurrence: NewOccurrence) -> Occurrence {
        let stored = occurrence.with_id(OccurrenceId::generate());
        self.rows.insert(stored.id.clone(), stored.clone());
        stored
    }

    pub fn replace(&mut self, id: &OccurrenceId, occurrence: NewOccurrence) -> Option<Occurrence> {
        let slot = self.rows.get_mut(id)?;
        *slot = occurrence.with_id(id.clone());
        Some(slot.clone())
    }

    pub fn remove(&mut self, id: &OccurrenceId) -> bool {
        self.rows.remove(id).is_some()
    }

    /// Remove every row matched by `plan` except `keep`, returning the count.
    pub fn remove_planned(&mut self, plan: &DeletionPlan, keep: Option<&OccurrenceId>) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|id, o| !plan.matches(o) || Some(id) == keep);
        (before - self.rows.len()) as u64
    }
}
