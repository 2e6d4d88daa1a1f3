//! Aggregation over [`DateDurationMap`]s, the per-date durations of a schedule.

use crate::{
    calendar::format_iso_date,
    date_range::{date_in_range, dates_in_range},
    duration::{is_valid, is_zero, sum, to_iso_string},
    error::Result,
    model::{DateDurationMap, DateRange, Duration, DurationPerDay, DurationWeekdays},
    weekday::weekday_from_date,
};

/// Entries whose duration is valid.
pub fn filter_valid(map: &DateDurationMap) -> DateDurationMap {
    map.iter()
        .filter(|(_, value)| is_valid(Some(&value.duration)))
        .map(|(date, value)| (*date, value.clone()))
        .collect()
}

/// Total of all entries; invalid entries count as zero.
pub fn summarize(map: &DateDurationMap) -> Duration {
    sum(map.values().map(|value| &value.duration))
}

fn has_time(value: &DurationPerDay) -> bool {
    is_valid(Some(&value.duration)) && !is_zero(&value.duration)
}

/// Number of entries with a valid, non-zero duration.
pub fn count_non_zero(map: &DateDurationMap) -> usize {
    map.values().filter(|value| has_time(value)).count()
}

pub fn dates_with_non_zero(map: &DateDurationMap) -> Vec<String> {
    map.iter()
        .filter(|(_, value)| has_time(value))
        .map(|(date, _)| format_iso_date(*date))
        .collect()
}

/// Entries dated within `range`. Invalid durations are kept unless `drop_invalid`.
pub fn restrict_to_range(
    map: &DateDurationMap,
    range: &DateRange,
    drop_invalid: bool,
) -> DateDurationMap {
    map.iter()
        .filter(|(date, _)| date_in_range(**date, range))
        .filter(|(_, value)| !drop_invalid || is_valid(Some(&value.duration)))
        .map(|(date, value)| (*date, value.clone()))
        .collect()
}

/// Two days are equal by percentage when both carry one, otherwise by duration.
pub fn durations_per_day_equal(a: &DurationPerDay, b: &DurationPerDay) -> bool {
    if let (Some(a), Some(b)) = (a.percentage, b.percentage) {
        return a == b;
    }

    to_iso_string(&a.duration) == to_iso_string(&b.duration)
}

/// Entries of `new` that are missing from `old` or differ from it.
pub fn diff(new: &DateDurationMap, old: &DateDurationMap) -> DateDurationMap {
    new.iter()
        .filter(|(date, value)| {
            old.get(*date)
                .map_or(true, |old_value| !durations_per_day_equal(value, old_value))
        })
        .map(|(date, value)| (*date, value.clone()))
        .collect()
}

/// Applies a weekly template to every business day in `range`.
///
/// Days the template leaves empty are skipped.
pub fn expand_weekdays(template: &DurationWeekdays, range: &DateRange) -> Result<DateDurationMap> {
    let map: DateDurationMap = dates_in_range(range, true)?
        .into_iter()
        .filter_map(|date| {
            let duration = template.get(weekday_from_date(date)?)?;
            Some((date, DurationPerDay::from(duration.clone())))
        })
        .collect();

    log::debug!(
        "expanded weekly template over {} days: {}",
        map.len(),
        summarize(&map)
    );

    Ok(map)
}
