//! Materialized appointment occurrences.
//!
//! An occurrence is one concrete, time-bounded calendar record. Recurring
//! appointments are stored as many occurrences sharing a `SeriesId`, so range
//! queries stay a plain interval filter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::RecurrenceKind;

/// Display color used when a request does not provide one.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Store-assigned identifier of a single occurrence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    /// Mint a fresh id. Only stores should call this.
    pub fn generate() -> Self {
        OccurrenceId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OccurrenceId {
    fn from(value: String) -> Self {
        OccurrenceId(value)
    }
}

impl From<&str> for OccurrenceId {
    fn from(value: &str) -> Self {
        OccurrenceId(value.to_string())
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity shared by every occurrence materialized from one recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    /// Mint a new series id (32 hex characters, no hyphens).
    pub fn generate() -> Self {
        SeriesId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        SeriesId(value)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub recurrence: RecurrenceKind,
    /// Inclusive end of the rule. Present iff `recurrence` is not `None`.
    pub recurrence_until: Option<DateTime<Utc>>,
    /// Present iff `recurrence` is not `None`.
    pub series_id: Option<SeriesId>,
}

impl Occurrence {
    /// Whether this occurrence belongs to a recurring series.
    pub fn in_series(&self) -> bool {
        self.recurrence != RecurrenceKind::None && self.series_id.is_some()
    }
}

/// An occurrence that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOccurrence {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub recurrence: RecurrenceKind,
    pub recurrence_until: Option<DateTime<Utc>>,
    pub series_id: Option<SeriesId>,
}

impl NewOccurrence {
    /// Attach an id, producing the stored form.
    pub fn with_id(self, id: OccurrenceId) -> Occurrence {
        Occurrence {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            color: self.color,
            recurrence: self.recurrence,
            recurrence_until: self.recurrence_until,
            series_id: self.series_id,
        }
    }
}
