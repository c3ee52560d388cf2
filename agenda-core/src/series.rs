//! Series edits.
//!
//! Editing an occurrence changes it and every later occurrence of its series,
//! never the earlier ones. The edit is planned here as a value and executed by
//! the service in two phases: prune the old future, then insert the new tail.
//! The phases are not atomic; a concurrent reader may briefly see the gap.
//!
//! Earlier occurrences keep whatever title, color and rule they had before the
//! split.

use chrono::{DateTime, Utc};

use crate::appointment::{Definition, Schedule};
use crate::occurrence::{NewOccurrence, Occurrence, OccurrenceId, SeriesId};

/// Siblings to remove: members of `series_id` starting at or after `from`,
/// excluding the edited occurrence itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prune {
    pub series_id: SeriesId,
    pub from: DateTime<Utc>,
    pub except: OccurrenceId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditPlan {
    /// The edited occurrence leaves its series and becomes standalone.
    Standalone {
        replacement: NewOccurrence,
        prune: Option<Prune>,
    },
    /// The series is split at the edited occurrence and regenerated from there.
    Split {
        replacement: NewOccurrence,
        prune: Prune,
        tail: Vec<NewOccurrence>,
    },
}

impl EditPlan {
    /// The new state of the edited record (replaced in place, same id).
    pub fn replacement(&self) -> &NewOccurrence {
        match self {
            EditPlan::Standalone { replacement, .. } | EditPlan::Split { replacement, .. } => {
                replacement
            }
        }
    }

    pub fn prune(&self) -> Option<&Prune> {
        match self {
            EditPlan::Standalone { prune, .. } => prune.as_ref(),
            EditPlan::Split { prune, .. } => Some(prune),
        }
    }

    pub fn tail(&self) -> &[NewOccurrence] {
        match self {
            EditPlan::Standalone { .. } => &[],
            EditPlan::Split { tail, .. } => tail,
        }
    }
}

/// Plan the edit of `existing` to the new `definition`.
pub fn plan_edit(existing: &Occurrence, definition: &Definition) -> EditPlan {
    match definition.schedule {
        Schedule::Single => {
            // Later members of the old series go away with the edited one;
            // the split point is where the occurrence sat before the edit.
            let prune = match &existing.series_id {
                Some(series_id) if existing.in_series() => Some(Prune {
                    series_id: series_id.clone(),
                    from: existing.start,
                    except: existing.id.clone(),
                }),
                _ => None,
            };
            EditPlan::Standalone {
                replacement: definition.standalone(),
                prune,
            }
        }
        Schedule::Recurring(rule) => {
            let series_id = existing.series_id.clone().unwrap_or_else(SeriesId::generate);
            let template = definition.template(rule, series_id.clone());
            EditPlan::Split {
                replacement: template.seed(),
                prune: Prune {
                    series_id,
                    from: definition.start,
                    except: existing.id.clone(),
                },
                tail: template.expand_following(),
            }
        }
    }
}
