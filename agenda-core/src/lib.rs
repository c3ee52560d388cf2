//! Core engine for agenda.
//!
//! Recurring appointments are stored as materialized occurrence rows. This crate
//! provides:
//! - `recurrence`: the occurrence generator (daily, weekly, monthly expansion)
//! - `series`: edit planning, which splits a series at the edited occurrence
//! - `deletion`: delete scope resolution (`single`, `following`, `all`)
//! - `date_range`: the half-open interval used by range queries
//! - `store`: the persistence contract plus in-memory and JSON file stores
//! - `service`: the request-level operations used by the HTTP layer

pub mod appointment;
pub mod config;
pub mod date_range;
pub mod deletion;
pub mod error;
pub mod occurrence;
pub mod recurrence;
pub mod series;
pub mod service;
pub mod store;
mod time;

pub use appointment::{AppointmentRequest, Definition, Schedule};
pub use config::{AgendaConfig, StoreBackend};
pub use date_range::DateRange;
pub use deletion::{DeleteScope, DeletionPlan};
pub use error::{AgendaError, AgendaResult};
pub use occurrence::{DEFAULT_COLOR, NewOccurrence, Occurrence, OccurrenceId, SeriesId};
pub use recurrence::{
    Frequency, MAX_OCCURRENCES, RecurrenceKind, RecurrenceRule, SeriesTemplate,
};
pub use series::EditPlan;
pub use service::Agenda;
pub use store::{FileStore, MemoryStore, OccurrenceStore};
