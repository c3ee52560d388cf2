//! Appointment operations exposed to the transport layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::appointment::{AppointmentRequest, Schedule};
use crate::date_range::DateRange;
use crate::deletion::{self, DeleteScope, DeletionPlan};
use crate::error::{AgendaError, AgendaResult};
use crate::occurrence::{Occurrence, OccurrenceId, SeriesId};
use crate::series::{self, EditPlan};
use crate::store::OccurrenceStore;

/// Request-scoped appointment operations over an injected store.
///
/// Holds no state of its own. Concurrent edits to one series are not
/// serialized here; callers needing that must lock per series.
#[derive(Clone)]
pub struct Agenda {
    store: Arc<dyn OccurrenceStore>,
}

impl Agenda {
    pub fn new(store: Arc<dyn OccurrenceStore>) -> Self {
        Agenda { store }
    }

    /// Create an appointment. Recurring appointments are materialized in one
    /// bulk insert; the returned occurrences are ordered by start.
    pub async fn create(&self, request: &AppointmentRequest) -> AgendaResult<Vec<Occurrence>> {
        let definition = request.validate()?;

        match definition.schedule {
            Schedule::Single => {
                let created = self.store.insert_one(definition.standalone()).await?;
                tracing::info!(id = %created.id, "created appointment");
                Ok(vec![created])
            }
            Schedule::Recurring(rule) => {
                let series_id = SeriesId::generate();
                let occurrences = definition.template(rule, series_id.clone()).expand();
                if occurrences.is_empty() {
                    return Err(AgendaError::validation("no occurrences generated"));
                }

                let created = self.store.insert_many(occurrences).await?;
                tracing::info!(
                    series = %series_id,
                    count = created.len(),
                    recurrence = %rule.frequency.kind(),
                    "created recurring appointment"
                );
                Ok(created)
            }
        }
    }

    /// Edit one occurrence. For recurring definitions this splits the series:
    /// earlier occurrences are left alone, the edited one is replaced in place
    /// and the rest of the series is regenerated.
    pub async fn update(
        &self,
        id: &OccurrenceId,
        request: &AppointmentRequest,
    ) -> AgendaResult<Occurrence> {
        let definition = request.validate()?;
        let existing = self.fetch(id).await?;

        let plan = series::plan_edit(&existing, &definition);
        tracing::debug!(
            %id,
            prune = plan.prune().is_some(),
            tail = plan.tail().len(),
            "planned edit"
        );
        let (replacement, prune, tail) = match plan {
            EditPlan::Standalone { replacement, prune } => (replacement, prune, Vec::new()),
            EditPlan::Split {
                replacement,
                prune,
                tail,
            } => (replacement, Some(prune), tail),
        };

        let updated = self
            .store
            .replace(id, replacement)
            .await?
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;

        // Delete then insert. Not atomic: readers may see the gap in between.
        if let Some(prune) = prune {
            let removed = self
                .store
                .delete_series_from_except(&prune.series_id, prune.from, &prune.except)
                .await?;
            tracing::debug!(series = %prune.series_id, removed, "pruned later occurrences");
        }
        let inserted = self.store.insert_many(tail).await?.len();

        tracing::info!(%id, inserted, "updated appointment");
        Ok(updated)
    }

    /// Delete an occurrence and, depending on `scope`, its series siblings.
    /// Returns the number of occurrences removed.
    pub async fn delete(&self, id: &OccurrenceId, scope: Option<&str>) -> AgendaResult<u64> {
        let scope = DeleteScope::parse_optional(scope)?;
        let existing = self.fetch(id).await?;

        let plan = deletion::resolve(&existing, scope);
        let removed = match &plan {
            DeletionPlan::One(id) => u64::from(self.store.delete(id).await?),
            DeletionPlan::Series(series_id) => self.store.delete_series(series_id).await?,
            DeletionPlan::SeriesFrom(series_id, from) => {
                self.store.delete_series_from(series_id, *from).await?
            }
        };

        if removed == 0 {
            // Someone else removed it between the fetch and the delete
            tracing::warn!(%id, %scope, "appointment vanished before delete");
            return Err(AgendaError::NotFound(id.to_string()));
        }

        tracing::info!(%id, %scope, removed, "deleted appointment");
        Ok(removed)
    }

    /// Occurrences overlapping `range`, ordered by start.
    pub async fn list(&self, range: &DateRange) -> AgendaResult<Vec<Occurrence>> {
        self.store.find_overlapping(range).await
    }

    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AgendaResult<Vec<Occurrence>> {
        self.list(&DateRange::new(from, to)?).await
    }

    async fn fetch(&self, id: &OccurrenceId) -> AgendaResult<Occurrence> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))
    }
}
