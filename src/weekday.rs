use chrono::NaiveDate;

use crate::{
    calendar::iso_weekday,
    duration::{is_zero, sum},
    model::{Duration, DurationWeekdays, InputDuration, Weekday},
};

/// Business day of `date`; `None` on Saturday and Sunday.
pub fn weekday_from_date(date: NaiveDate) -> Option<Weekday> {
    Weekday::from_iso_number(iso_weekday(date))
}

pub fn is_date_in_weekdays(date: NaiveDate, weekdays: Option<&[Weekday]>) -> bool {
    match (weekdays, weekday_from_date(date)) {
        (Some(weekdays), Some(weekday)) => weekdays.contains(&weekday),
        _ => false,
    }
}

pub fn summarize_weekdays(template: &DurationWeekdays) -> Duration {
    sum(template.iter().filter_map(|(_, duration)| duration))
}

pub fn duration_for_iso_weekday(
    template: &DurationWeekdays,
    iso_weekday: u32,
) -> Option<&InputDuration> {
    Weekday::from_iso_number(iso_weekday).and_then(|weekday| template.get(weekday))
}

pub fn weekdays_with_duration(template: &DurationWeekdays) -> Vec<Weekday> {
    template
        .iter()
        .filter(|(_, duration)| has_duration(*duration))
        .map(|(weekday, _)| weekday)
        .collect()
}

pub fn weekdays_without_duration(template: &DurationWeekdays) -> Vec<Weekday> {
    template
        .iter()
        .filter(|(_, duration)| !has_duration(*duration))
        .map(|(weekday, _)| weekday)
        .collect()
}

fn has_duration(duration: Option<&InputDuration>) -> bool {
    duration.is_some_and(|duration| !is_zero(duration))
}
