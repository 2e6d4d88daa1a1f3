//! Calendar-day primitives shared by the range, weekday and duration-map modules.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{Error, Result};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(Error::InvalidIsoDate(text.to_string()));
    }

    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
        .map_err(|_| Error::InvalidIsoDate(text.to_string()))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// 1 for Monday through 7 for Sunday.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

pub fn iso_weekday_from_iso_date(text: &str) -> Result<u32> {
    parse_iso_date(text).map(iso_weekday)
}

pub fn is_weekday(date: NaiveDate) -> bool {
    iso_weekday(date) <= 5
}

// Week and month bounds clamp to `NaiveDate::MIN..=NaiveDate::MAX`.

pub fn start_of_iso_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(iso_weekday(date) - 1)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn end_of_iso_week(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(7 - iso_weekday(date))))
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// `None` for the last month chrono can represent.
pub fn start_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    start_of_month(date).checked_add_months(Months::new(1))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    match start_of_next_month(date) {
        Some(next) => next - Days::new(1),
        None => NaiveDate::MAX,
    }
}

pub fn first_weekday_on_or_after(date: NaiveDate) -> NaiveDate {
    let skip = match iso_weekday(date) {
        6 => 2,
        7 => 1,
        _ => return date,
    };
    date.checked_add_days(Days::new(skip)).unwrap_or(NaiveDate::MAX)
}

pub fn last_weekday_on_or_before(date: NaiveDate) -> NaiveDate {
    let skip = match iso_weekday(date) {
        6 => 1,
        7 => 2,
        _ => return date,
    };
    date.checked_sub_days(Days::new(skip)).unwrap_or(NaiveDate::MIN)
}

pub fn first_weekday_in_month(month: NaiveDate) -> NaiveDate {
    first_weekday_on_or_after(start_of_month(month))
}

pub fn last_weekday_in_month(month: NaiveDate) -> NaiveDate {
    last_weekday_on_or_before(end_of_month(month))
}

pub fn first_of_two_dates(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    a.min(b)
}

pub fn last_of_two_dates(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    a.max(b)
}

pub fn is_date_in_dates(date: NaiveDate, dates: Option<&[NaiveDate]>) -> bool {
    dates.is_some_and(|dates| dates.contains(&date))
}

/// `YYYY-MM`
pub fn year_month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Days from `from` to `to` inclusive; empty when `from > to`.
pub(crate) fn days_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(from), |date| date.succ_opt())
        .take_while(move |date| *date <= to)
}
