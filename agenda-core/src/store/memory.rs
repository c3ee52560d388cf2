//! Volatile store for tests and throwaway servers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::OccurrenceStore;
use super::collection::Collection;
use crate::date_range::{DateRange, sort_by_start};
use crate::deletion::DeletionPlan;
use crate::error::AgendaResult;
use crate::occurrence::{NewOccurrence, Occurrence, OccurrenceId, SeriesId};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored occurrence ordered by start.
    pub async fn all(&self) -> Vec<Occurrence> {
        let mut rows: Vec<Occurrence> =
            self.inner.read().await.rows().into_iter().cloned().collect();
        sort_by_start(&mut rows);
        rows
    }
}

#[async_trait]
impl OccurrenceStore for MemoryStore {
    async fn find_overlapping(&self, range: &DateRange) -> AgendaResult<Vec<Occurrence>> {
        Ok(self.inner.read().await.overlapping(range))
    }

    async fn get(&self, id: &OccurrenceId) -> AgendaResult<Option<Occurrence>> {
        Ok(self.inner.read().await.get(id))
    }

    async fn insert_one(&self, occurrence: NewOccurrence) -> AgendaResult<Occurrence> {
        Ok(self.inner.write().await.insert(occurrence))
    }

    async fn insert_many(&self, occurrences: Vec<NewOccurrence>) -> AgendaResult<Vec<Occurrence>> {
        if occurrences.is_empty() {
            return Ok(Vec::new());
        }
        let mut inner = self.inner.write().await;
        Ok(occurrences.into_iter().map(|o| inner.insert(o)).collect())
    }

    async fn replace(
        &self,
        id: &OccurrenceId,
        occurrence: NewOccurrence,
    ) -> AgendaResult<Option<Occurrence>> {
        Ok(self.inner.write().await.replace(id, occurrence))
    }

    async fn delete(&self, id: &OccurrenceId) -> AgendaResult<bool> {
        Ok(self.inner.write().await.remove(id))
    }

    async fn delete_series(&self, series_id: &SeriesId) -> AgendaResult<u64> {
        let plan = DeletionPlan::Series(series_id.clone());
        Ok(self.inner.write().await.remove_planned(&plan, None))
    }

    async fn delete_series_from(
        &self,
        series_id: &SeriesId,
        from: DateTime<Utc>,
    ) -> AgendaResult<u64> {
        let plan = DeletionPlan::SeriesFrom(series_id.clone(), from);
        Ok(self.inner.write().await.remove_planned(&plan, None))
    }

    async fn delete_series_from_except(
        &self,
        series_id: &SeriesId,
        from: DateTime<Utc>,
        except: &OccurrenceId,
    ) -> AgendaResult<u64> {
        let plan = DeletionPlan::SeriesFrom(series_id.clone(), from);
        Ok(self.inner.write().await.remove_planned(&plan, Some(except)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::DEFAULT_COLOR;
    use crate::recurrence::RecurrenceKind;
    use chrono::{Datelike, Duration, TimeZone};

    fn weekly(series: &str, weeks: i64) -> Vec<NewOccurrence> {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        (0..weeks)
            .map(|i| NewOccurrence {
                title: "Standup".to_string(),
                start: start + Duration::weeks(i),
                end: start + Duration::weeks(i) + Duration::hours(1),
                color: DEFAULT_COLOR.to_string(),
                recurrence: RecurrenceKind::Weekly,
                recurrence_until: Some(start + Duration::weeks(weeks)),
                series_id: Some(SeriesId::from(series.to_string())),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_many_assigns_ids() {
        let store = MemoryStore::new();
        let stored = store.insert_many(weekly("s1", 3)).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert_ne!(stored[0].id, stored[1].id);
        assert!(store.insert_many(Vec::new()).await.unwrap().is_empty());
        assert_eq!(store.all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_replace_and_delete_report_matches() {
        let store = MemoryStore::new();
        let stored = store.insert_many(weekly("s1", 1)).await.unwrap();
        let id = stored[0].id.clone();
        let missing = OccurrenceId::from("missing");

        let mut changed = weekly("s1", 1).remove(0);
        changed.title = "Renamed".to_string();
        let replaced = store.replace(&id, changed.clone()).await.unwrap().unwrap();
        assert_eq!(replaced.id, id);
        assert_eq!(replaced.title, "Renamed");
        assert!(store.replace(&missing, changed).await.unwrap().is_none());

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_series_deletes_count_only_their_series() {
        let store = MemoryStore::new();
        let s1 = store.insert_many(weekly("s1", 4)).await.unwrap();
        store.insert_many(weekly("s2", 4)).await.unwrap();
        let series = SeriesId::from("s1".to_string());

        let removed = store
            .delete_series_from_except(&series, s1[1].start, &s1[2].id)
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(store.get(&s1[2].id).await.unwrap().is_some());

        assert_eq!(store.delete_series_from(&series, s1[2].start).await.unwrap(), 1);
        assert_eq!(store.delete_series(&series).await.unwrap(), 1);
        assert_eq!(store.all().await.len(), 4);
    }

    #[tokio::test]
    async fn test_find_overlapping_sorted() {
        let store = MemoryStore::new();
        let mut rows = weekly("s1", 4);
        rows.reverse();
        store.insert_many(rows).await.unwrap();
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 26, 9, 0, 0).unwrap(),
        )
        .unwrap();
        let found = store.find_overlapping(&range).await.unwrap();
        // Jan 12 ends exactly at `from`, Jan 26 starts exactly at `to`
        let starts: Vec<_> = found.iter().map(|o| o.start.day()).collect();
        assert_eq!(starts, vec![19]);
    }
}
