//! Delete scope resolution.
//!
//! Turns a targeted occurrence plus a requested scope into the set of
//! occurrences to remove, described by series membership and start ordering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::AgendaError;
use crate::occurrence::{Occurrence, OccurrenceId, SeriesId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteScope {
    #[default]
    Single,
    Following,
    All,
}

impl DeleteScope {
    /// Parse an optional query value. Absent means `single`.
    pub fn parse_optional(value: Option<&str>) -> Result<Self, AgendaError> {
        value.map_or(Ok(DeleteScope::Single), str::parse)
    }
}

impl FromStr for DeleteScope {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(DeleteScope::Single),
            "following" => Ok(DeleteScope::Following),
            "all" => Ok(DeleteScope::All),
            _ => Err(AgendaError::validation(format!(
                "invalid scope '{s}', expected one of: single, following, all"
            ))),
        }
    }
}

impl fmt::Display for DeleteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeleteScope::Single => "single",
            DeleteScope::Following => "following",
            DeleteScope::All => "all",
        };
        f.write_str(s)
    }
}

/// The resolved set of occurrences a delete removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionPlan {
    /// Exactly one occurrence.
    One(OccurrenceId),
    /// Every member of a series.
    Series(SeriesId),
    /// Members of a series starting at or after the given instant.
    SeriesFrom(SeriesId, DateTime<Utc>),
}

impl DeletionPlan {
    /// Whether `occurrence` belongs to the resolved set.
    pub fn matches(&self, occurrence: &Occurrence) -> bool {
        match self {
            DeletionPlan::One(id) => &occurrence.id == id,
            DeletionPlan::Series(series_id) => occurrence.series_id.as_ref() == Some(series_id),
            DeletionPlan::SeriesFrom(series_id, from) => {
                occurrence.series_id.as_ref() == Some(series_id) && occurrence.start >= *from
            }
        }
    }
}

/// Resolve the occurrences removed by deleting `target` with `scope`.
///
/// Occurrences outside a series always resolve to themselves alone.
pub fn resolve(target: &Occurrence, scope: DeleteScope) -> DeletionPlan {
    let series_id = match &target.series_id {
        Some(series_id) if target.in_series() => series_id.clone(),
        _ => return DeletionPlan::One(target.id.clone()),
    };

    match scope {
        DeleteScope::Single => DeletionPlan::One(target.id.clone()),
        DeleteScope::All => DeletionPlan::Series(series_id),
        DeleteScope::Following => DeletionPlan::SeriesFrom(series_id, target.start),
    }
}
