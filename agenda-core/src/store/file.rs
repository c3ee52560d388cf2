//! JSON file store.
//!
//! The whole collection lives in memory and is rewritten to disk after every
//! mutation (write to a temp file, then rename). A mutation only becomes
//! visible once the file has been written.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::OccurrenceStore;
use super::collection::Collection;
use crate::date_range::{DateRange, sort_by_start};
use crate::deletion::DeletionPlan;
use crate::error::AgendaResult;
use crate::occurrence::{NewOccurrence, Occurrence, OccurrenceId, SeriesId};

pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Collection>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> AgendaResult<Self> {
        let path = path.into();

        let rows: Vec<Occurrence> = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), rows = rows.len(), "opened file store");

        Ok(FileStore {
            path,
            inner: Mutex::new(Collection::from_rows(rows)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy of the collection. If `f` reports a change the copy
    /// is persisted and then published.
    async fn mutate<T, F>(&self, f: F) -> AgendaResult<T>
    where
        F: FnOnce(&mut Collection) -> (T, bool),
    {
        let mut inner = self.inner.lock().await;
        let mut working = inner.clone();
        let (out, changed) = f(&mut working);
        if changed {
            self.persist(&working).await?;
            *inner = working;
        }
        Ok(out)
    }

    async fn persist(&self, collection: &Collection) -> AgendaResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Sort for deterministic output
        let mut rows: Vec<Occurrence> = collection.rows().into_iter().cloned().collect();
        sort_by_start(&mut rows);
        let content = serde_json::to_string_pretty(&rows)?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, content).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OccurrenceStore for FileStore {
    async fn find_overlapping(&self, range: &DateRange) -> AgendaResult<Vec<Occurrence>> {
        Ok(self.inner.lock().await.overlapping(range))
    }

    async fn get(&self, id: &OccurrenceId) -> AgendaResult<Option<Occurrence>> {
        Ok(self.inner.lock().await.get(id))
    }

    async fn insert_one(&self, occurrence: NewOccurrence) -> AgendaResult<Occurrence> {
        self.mutate(|c| (c.insert(occurrence), true)).await
    }

    async fn insert_many(&self, occurrences: Vec<NewOccurrence>) -> AgendaResult<Vec<Occurrence>> {
        if occurrences.is_empty() {
            return Ok(Vec::new());
        }
        self.mutate(|c| (occurrences.into_iter().map(|o| c.insert(o)).collect(), true))
            .await
    }

    async fn replace(
        &self,
        id: &OccurrenceId,
        occurrence: NewOccurrence,
    ) -> AgendaResult<Option<Occurrence>> {
        self.mutate(|c| {
            let replaced = c.replace(id, occurrence);
            let changed = replaced.is_some();
            (replaced, changed)
        })
        .await
    }

    async fn delete(&self, id: &OccurrenceId) -> AgendaResult<bool> {
        self.mutate(|c| {
            let removed = c.remove(id);
            (removed, removed)
        })
        .await
    }

    async fn delete_series(&self, series_id: &SeriesId) -> AgendaResult<u64> {
        let plan = DeletionPlan::Series(series_id.clone());
        self.mutate(|c| counted(c.remove_planned(&plan, None))).await
    }

    async fn delete_series_from(
        &self,
        series_id: &SeriesId,
        from: DateTime<Utc>,
    ) -> AgendaResult<u64> {
        let plan = DeletionPlan::SeriesFrom(series_id.clone(), from);
        self.mutate(|c| counted(c.remove_planned(&plan, None))).await
    }

    async fn delete_series_from_except(
        &self,
        series_id: &SeriesId,
        from: DateTime<Utc>,
        except: &OccurrenceId,
    ) -> AgendaResult<u64> {
        let plan = DeletionPlan::SeriesFrom(series_id.clone(), from);
        self.mutate(|c| counted(c.remove_planned(&plan, Some(except)))).await
    }
}

fn counted(removed: u64) -> (u64, bool) {
    (removed, removed > 0)
}
