//! Date ranges and hours/minutes durations for schedule forms.
//!
//! - [`calendar`] has the calendar-day primitives everything else builds on.
//! - [`date_range`] splits, compares and combines [`DateRange`]s.
//! - [`duration`] normalizes partial durations and converts between the
//!   ISO-8601 (`PT7H30M`), decimal and component forms.
//! - [`date_duration`] aggregates per-date durations.
//! - [`weekday`] works with weekly templates.

pub mod calendar;
pub mod date_duration;
pub mod date_range;
pub mod duration;
pub mod error;
pub mod model;
pub mod parser;
pub mod settings;
pub mod weekday;

pub use error::{Error, Result};
pub use model::{
    DateDurationMap, DateRange, Duration, DurationField, DurationPerDay, DurationWeekdays,
    InputDuration, MaybeDateRange, Weekday,
};
