//! Date range for calendar display queries.

use chrono::{DateTime, Utc};

use crate::error::{AgendaError, AgendaResult};
use crate::occurrence::Occurrence;
use crate::time::parse_instant;

/// Half-open interval `[from, to)` with `to > from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> AgendaResult<Self> {
        if to <= from {
            return Err(AgendaError::validation("'to' must be after 'from'"));
        }
        Ok(DateRange { from, to })
    }

    /// Parse query-string bounds into a DateRange.
    pub fn from_args(from: &str, to: &str) -> AgendaResult<Self> {
        let from = parse_instant(from).map_err(AgendaError::Validation)?;
        let to = parse_instant(to).map_err(AgendaError::Validation)?;
        Self::new(from, to)
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// An interval overlaps when it starts before `to` and ends after `from`.
    /// Touching either boundary does not count.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.to && end > self.from
    }

    pub fn contains(&self, occurrence: &Occurrence) -> bool {
        self.overlaps(occurrence.start, occurrence.end)
    }
}

/// Order query results by start, then id so ties are stable.
pub(crate) fn sort_by_start(occurrences: &mut [Occurrence]) {
    occurrences.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}
