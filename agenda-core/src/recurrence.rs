//! Recurrence rules and occurrence generation.
//!
//! Expands a rule into a bounded, eagerly materialized list of occurrences.
//! Every generated occurrence shares the title, color, rule and series id of
//! the template it came from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AgendaError;
use crate::occurrence::{NewOccurrence, SeriesId};

/// Upper bound on occurrences produced by one generation batch.
pub const MAX_OCCURRENCES: usize = 1500;

/// Recurrence kind as stored on every occurrence and sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::None => "none",
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
        }
    }

    /// The period of a recurring kind, `None` for standalone appointments.
    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            RecurrenceKind::None => None,
            RecurrenceKind::Daily => Some(Frequency::Daily),
            RecurrenceKind::Weekly => Some(Frequency::Weekly),
            RecurrenceKind::Monthly => Some(Frequency::Monthly),
        }
    }

    /// Parse an optional wire value. Absent or blank means `none`.
    pub fn parse_optional(value: Option<&str>) -> Result<Self, AgendaError> {
        match value.map(str::trim) {
            None | Some("") => Ok(RecurrenceKind::None),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for RecurrenceKind {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RecurrenceKind::None),
            "daily" => Ok(RecurrenceKind::Daily),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            _ => Err(AgendaError::validation(format!(
                "invalid recurrence '{s}', expected one of: none, daily, weekly, monthly"
            ))),
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecurrenceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurrenceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Spacing between consecutive occurrences of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Move an instant forward by one period.
    ///
    /// Monthly steps use calendar-month arithmetic and clamp to the last day
    /// of the target month (Jan 31 becomes Feb 28 or 29). Returns `None` when
    /// the result is not representable.
    pub fn advance(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Frequency::Daily => instant.checked_add_signed(Duration::days(1)),
            Frequency::Weekly => instant.checked_add_signed(Duration::weeks(1)),
            Frequency::Monthly => instant.checked_add_months(Months::new(1)),
        }
    }

    pub fn kind(&self) -> RecurrenceKind {
        match self {
            Frequency::Daily => RecurrenceKind::Daily,
            Frequency::Weekly => RecurrenceKind::Weekly,
            Frequency::Monthly => RecurrenceKind::Monthly,
        }
    }
}

/// A recurrence rule: a period plus an inclusive end instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub until: DateTime<Utc>,
}

/// Everything needed to materialize a series.
///
/// `start`/`end` describe the seed occurrence. Callers validate
/// `end > start` and `until >= start` before expanding.
#[derive(Debug, Clone)]
pub struct SeriesTemplate {
    pub title: String,
    pub color: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rule: RecurrenceRule,
    pub series_id: SeriesId,
}

impl SeriesTemplate {
    /// Expand the series beginning at the seed occurrence.
    pub fn expand(&self) -> Vec<NewOccurrence> {
        self.materialize(Some(self.start))
    }

    /// Expand the series beginning one period after the seed occurrence.
    pub fn expand_following(&self) -> Vec<NewOccurrence> {
        self.materialize(self.rule.frequency.advance(self.start))
    }

    /// The seed occurrence itself, carrying the series metadata.
    pub fn seed(&self) -> NewOccurrence {
        self.occurrence(self.start, self.end)
    }

    fn materialize(&self, first: Option<DateTime<Utc>>) -> Vec<NewOccurrence> {
        // Each occurrence keeps the seed's length, so month clamping can
        // never produce an end before its start.
        let duration = self.end - self.start;
        let mut occurrences = Vec::new();
        let mut cursor = first;

        while let Some(start) = cursor {
            if start > self.rule.until || occurrences.len() >= MAX_OCCURRENCES {
                break;
            }
            let Some(end) = start.checked_add_signed(duration) else {
                break;
            };
            occurrences.push(self.occurrence(start, end));
            cursor = self.rule.frequency.advance(start);
        }

        occurrences
    }

    fn occurrence(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> NewOccurrence {
        NewOccurrence {
            title: self.title.clone(),
            start,
            end,
            color: self.color.clone(),
            recurrence: self.rule.frequency.kind(),
            recurrence_until: Some(self.rule.until),
            series_id: Some(self.series_id.clone()),
        }
    }
}
