//! Occurrence persistence.
//!
//! The engine only talks to storage through `OccurrenceStore`. Bulk deletes
//! report how many rows they removed; single-row calls report whether the row
//! existed. Backend failures surface as `AgendaError::Store` (or `Io` for the
//! file store) and are never retried.

mod collection;
mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::date_range::DateRange;
use crate::error::AgendaResult;
use crate::occurrence::{NewOccurrence, Occurrence, OccurrenceId, SeriesId};

#[async_trait]
pub trait OccurrenceStore: Send + Sync {
    /// Occurrences overlapping `range`, ordered by start.
    async fn find_overlapping(&self, range: &DateRange) -> AgendaResult<Vec<Occurrence>>;

    async fn get(&self, id: &OccurrenceId) -> AgendaResult<Option<Occurrence>>;

    async fn insert_one(&self, occurrence: NewOccurrence) -> AgendaResult<Occurrence>;

    /// Insert in order. An empty batch is a no-op.
    async fn insert_many(&self, occurrences: Vec<NewOccurrence>) -> AgendaResult<Vec<Occurrence>>;

    /// Replace the row with `id`, keeping the id. `None` if no row matched.
    async fn replace(
        &self,
        id: &OccurrenceId,
        occurrence: NewOccurrence,
    ) -> AgendaResult<Option<Occurrence>>;

    async fn delete(&self, id: &OccurrenceId) -> AgendaResult<bool>;

    async fn delete_series(&self, series_id: &SeriesId) -> AgendaResult<u64>;

    /// Delete members of `series_id` with `start >= from`.
    async fn delete_series_from(&self, series_id: &SeriesId, from: DateTime<Utc>)
    -> AgendaResult<u64>;

    /// Like `delete_series_from` but keeps the row with id `except`.
    async fn delete_series_from_except(
        &self,
        series_id: &SeriesId,
        from: DateTime<Utc>,
        except: &OccurrenceId,
    ) -> AgendaResult<u64>;
}
