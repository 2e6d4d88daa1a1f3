use std::{fs, path::Path};

use anyhow::Context;

use crate::{
    date_duration::{expand_weekdays, restrict_to_range},
    error::Result,
    model::{DateDurationMap, DateRange, DurationWeekdays},
};

/// A schedule file: an optional weekly template plus explicit per-date entries.
///
/// ```toml
/// range = { from = "2021-01-04", to = "2021-01-31" }
///
/// [weekdays]
/// monday = { hours = 7, minutes = 30 }
///
/// [dates."2021-01-05"]
/// duration = { hours = "2", minutes = "" }
/// ```
///
/// Dates are quoted; TOML date literals are not accepted.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Schedule {
    pub range: Option<DateRange>,
    pub weekdays: Option<DurationWeekdays>,
    pub dates: DateDurationMap,
}

impl Schedule {
    pub fn from_toml(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read schedule {}", path.display()))?;
        let schedule = Self::from_toml(&source)
            .with_context(|| format!("failed to parse schedule {}", path.display()))?;
        log::debug!(
            "loaded schedule {} with {} dated entries",
            path.display(),
            schedule.dates.len()
        );

        Ok(schedule)
    }

    /// Per-date durations within `range` (or the schedule's own range).
    ///
    /// The weekly template fills the business days of the range; dated
    /// entries replace template days. Without any range, only dated entries
    /// are returned.
    pub fn durations(&self, range: Option<&DateRange>) -> Result<DateDurationMap> {
        let Some(range) = range.or(self.range.as_ref()) else {
            return Ok(self.dates.clone());
        };

        let mut map = match &self.weekdays {
            Some(template) => expand_weekdays(template, range)?,
            None => DateDurationMap::new(),
        };
        map.extend(restrict_to_range(&self.dates, range, false));

        Ok(map)
    }
}
