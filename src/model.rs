use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Inclusive range of calendar days.
///
/// Fields are public, so a range may be built with `from > to`. Operations
/// that walk a range check the order and return [`Error::InvertedRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let range = Self { from, to };
        range.ensure_ordered()?;
        Ok(range)
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { from: date, to: date }
    }

    pub(crate) fn ensure_ordered(&self) -> Result<()> {
        if self.from > self.to {
            log::debug!("rejecting inverted date range {} > {}", self.from, self.to);
            return Err(Error::InvertedRange {
                from: self.from,
                to: self.to,
            });
        }

        Ok(())
    }
}

/// A range where either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct MaybeDateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Canonical hours and minutes.
///
/// Minutes are not carried into hours, so `minutes >= 60` is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Duration {
    pub hours: u32,
    pub minutes: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        hours: 0,
        minutes: 0,
    };

    pub const fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

/// One raw hours or minutes field as it arrives from a form or a schedule file.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum DurationField {
    Integer(i64),
    Text(String),
    Other(toml::Value),
}

impl From<u32> for DurationField {
    fn from(value: u32) -> Self {
        DurationField::Integer(i64::from(value))
    }
}

impl From<i64> for DurationField {
    fn from(value: i64) -> Self {
        DurationField::Integer(value)
    }
}

impl From<&str> for DurationField {
    fn from(value: &str) -> Self {
        DurationField::Text(value.to_string())
    }
}

impl From<String> for DurationField {
    fn from(value: String) -> Self {
        DurationField::Text(value)
    }
}

/// Partial duration awaiting normalization.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InputDuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<DurationField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<DurationField>,
}

impl InputDuration {
    pub fn new(hours: impl Into<DurationField>, minutes: impl Into<DurationField>) -> Self {
        Self {
            hours: Some(hours.into()),
            minutes: Some(minutes.into()),
        }
    }

    pub fn hours(hours: impl Into<DurationField>) -> Self {
        Self {
            hours: Some(hours.into()),
            minutes: None,
        }
    }

    pub fn minutes(minutes: impl Into<DurationField>) -> Self {
        Self {
            hours: None,
            minutes: Some(minutes.into()),
        }
    }
}

impl From<Duration> for InputDuration {
    fn from(duration: Duration) -> Self {
        Self::new(duration.hours, duration.minutes)
    }
}

/// Duration registered on a single date, optionally as a percentage of a full day.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DurationPerDay {
    #[serde(default)]
    pub duration: InputDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl From<InputDuration> for DurationPerDay {
    fn from(duration: InputDuration) -> Self {
        Self {
            duration,
            percentage: None,
        }
    }
}

pub type DateDurationMap = BTreeMap<NaiveDate, DurationPerDay>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// 1 for Monday through 5 for Friday.
    pub fn iso_number(self) -> u32 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
        }
    }

    pub fn from_iso_number(iso_weekday: u32) -> Option<Self> {
        match iso_weekday {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            _ => None,
        }
    }
}

/// Weekly template: an optional duration for each business day.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DurationWeekdays {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<InputDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<InputDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<InputDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<InputDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<InputDuration>,
}

impl DurationWeekdays {
    pub fn get(&self, weekday: Weekday) -> Option<&InputDuration> {
        match weekday {
            Weekday::Monday => self.monday.as_ref(),
            Weekday::Tuesday => self.tuesday.as_ref(),
            Weekday::Wednesday => self.wednesday.as_ref(),
            Weekday::Thursday => self.thursday.as_ref(),
            Weekday::Friday => self.friday.as_ref(),
        }
    }

    /// Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<&InputDuration>)> + '_ {
        Weekday::ALL
            .into_iter()
            .map(move |weekday| (weekday, self.get(weekday)))
    }
}
