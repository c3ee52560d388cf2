//! Appointment definitions as received from the transport layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AgendaError, AgendaResult};
use crate::occurrence::{DEFAULT_COLOR, NewOccurrence, SeriesId};
use crate::recurrence::{RecurrenceKind, RecurrenceRule, SeriesTemplate};
use crate::time::{deserialize_instant, deserialize_optional_instant};

/// Body of a create or update request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "deserialize_instant")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub recurrence_until: Option<DateTime<Utc>>,
}

/// Whether an appointment stands alone or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Single,
    Recurring(RecurrenceRule),
}

/// A validated appointment definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub schedule: Schedule,
}

impl AppointmentRequest {
    pub fn validate(&self) -> AgendaResult<Definition> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AgendaError::validation("title is required"));
        }
        if self.end <= self.start {
            return Err(AgendaError::validation("end must be after start"));
        }

        let kind = RecurrenceKind::parse_optional(self.recurrence.as_deref())?;
        let color = match self.color.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => DEFAULT_COLOR.to_string(),
        };

        let schedule = match kind.frequency() {
            None => Schedule::Single,
            Some(frequency) => {
                let until = self.recurrence_until.ok_or_else(|| {
                    AgendaError::validation("recurrenceUntil is required for recurring appointments")
                })?;
                if until < self.start {
                    return Err(AgendaError::validation(
                        "recurrenceUntil must not be before start",
                    ));
                }
                Schedule::Recurring(RecurrenceRule { frequency, until })
            }
        };

        Ok(Definition {
            title: title.to_string(),
            start: self.start,
            end: self.end,
            color,
            schedule,
        })
    }
}

impl Definition {
    /// The definition as a standalone, non-recurring occurrence.
    pub fn standalone(&self) -> NewOccurrence {
        NewOccurrence {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            color: self.color.clone(),
            recurrence: RecurrenceKind::None,
            recurrence_until: None,
            series_id: None,
        }
    }

    /// The series template rooted at this definition.
    pub fn template(&self, rule: RecurrenceRule, series_id: SeriesId) -> SeriesTemplate {
        SeriesTemplate {
            title: self.title.clone(),
            color: self.color.clone(),
            start: self.start,
            end: self.end,
            rule,
            series_id,
        }
    }
}
