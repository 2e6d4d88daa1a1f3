//! Partitioning, comparison and combination of [`DateRange`]s.

use std::cmp::Ordering;

use chrono::{Datelike, Days, NaiveDate};

use crate::{
    calendar::{
        days_inclusive, end_of_iso_week, end_of_month, first_weekday_in_month, format_iso_date,
        is_weekday, last_weekday_in_month, parse_iso_date, start_of_iso_week, start_of_month,
        start_of_next_month,
    },
    error::{Error, Result},
    model::{DateRange, MaybeDateRange},
};

/// Splits `range` into ISO weeks (Monday to Sunday), clipped to the range.
///
/// When `range.to` is the Monday that starts a new week, it is emitted as a
/// one-day range of its own.
pub fn weeks_in_range(range: &DateRange) -> Result<Vec<DateRange>> {
    range.ensure_ordered()?;

    let mut weeks = Vec::new();
    let mut current = range.from;
    loop {
        let week_end = end_of_iso_week(current);
        weeks.push(DateRange {
            from: current,
            to: week_end.min(range.to),
        });
        match week_end.checked_add_days(Days::new(1)) {
            Some(next) if next < range.to => current = next,
            Some(next) if next == range.to => {
                weeks.push(DateRange::single(range.to));
                break;
            }
            _ => break,
        }
    }

    Ok(weeks)
}

/// Splits `range` into calendar months.
///
/// With `full_months` every entry spans its whole month; otherwise the first
/// and last entries are clipped to `range`.
pub fn months_in_range(range: &DateRange, full_months: bool) -> Result<Vec<DateRange>> {
    range.ensure_ordered()?;

    let mut months = Vec::new();
    let mut current = range.from;
    while current <= range.to {
        let from = if full_months {
            start_of_month(current)
        } else {
            current
        };
        let end = end_of_month(current);
        let to = if full_months { end } else { end.min(range.to) };
        months.push(DateRange { from, to });
        match start_of_next_month(current) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(months)
}

pub fn dates_in_range(range: &DateRange, weekdays_only: bool) -> Result<Vec<NaiveDate>> {
    range.ensure_ordered()?;

    Ok(days_inclusive(range.from, range.to)
        .filter(|date| !weekdays_only || is_weekday(*date))
        .collect())
}

/// Number of days in `range`, both ends included.
///
/// The plain count is symmetric, so an inverted range counts the same days.
/// Counting weekdays walks the range and rejects an inverted one.
pub fn days_between(range: &DateRange, weekdays_only: bool) -> Result<i64> {
    if weekdays_only {
        return Ok(dates_in_range(range, true)?.len() as i64);
    }

    Ok((range.to - range.from).num_days().abs() + 1)
}

/// Days of `month` that fall before `range.from` or after `range.to`.
pub fn dates_in_month_outside_range(month: NaiveDate, range: &DateRange) -> Vec<NaiveDate> {
    let whole_month = month_range(month, false);
    let mut dates = Vec::new();

    if range.from > whole_month.from {
        dates.extend(days_inclusive(
            whole_month.from,
            (range.from - Days::new(1)).min(whole_month.to),
        ));
    }
    if range.to < whole_month.to {
        dates.extend(days_inclusive(
            (range.to + Days::new(1)).max(whole_month.from),
            whole_month.to,
        ));
    }

    dates
}

/// The month containing `date`, or its first to last weekday.
pub fn month_range(date: NaiveDate, weekdays_only: bool) -> DateRange {
    if weekdays_only {
        DateRange {
            from: first_weekday_in_month(date),
            to: last_weekday_in_month(date),
        }
    } else {
        DateRange {
            from: start_of_month(date),
            to: end_of_month(date),
        }
    }
}

/// The ISO week containing `date`, Monday to Sunday or Monday to Friday.
pub fn week_range(date: NaiveDate, weekdays_only: bool) -> DateRange {
    let to = end_of_iso_week(date);
    DateRange {
        from: start_of_iso_week(date),
        to: if weekdays_only { to - Days::new(2) } else { to },
    }
}

/// The ISO week containing `date`, optionally clipped to the month of `date`.
pub fn week_of_date(date: NaiveDate, within_same_month: bool) -> DateRange {
    let week = week_range(date, false);
    if !within_same_month {
        return week;
    }

    DateRange {
        from: week.from.max(start_of_month(date)),
        to: week.to.min(end_of_month(date)),
    }
}

/// Weeks of `month`; `include_whole_weeks` widens the first and last to full ISO weeks.
pub fn weeks_in_month(month: NaiveDate, include_whole_weeks: bool) -> Vec<DateRange> {
    let month = month_range(month, false);
    let range = if include_whole_weeks {
        DateRange {
            from: start_of_iso_week(month.from),
            to: end_of_iso_week(month.to),
        }
    } else {
        month
    };

    // A month range is never inverted.
    weeks_in_range(&range).unwrap_or_default()
}

pub fn dates_in_month(month: NaiveDate, weekdays_only: bool) -> Vec<NaiveDate> {
    let range = month_range(month, weekdays_only);
    days_inclusive(range.from, range.to)
        .filter(|date| !weekdays_only || is_weekday(*date))
        .collect()
}

/// Distinct start years, in order of first appearance.
pub fn years_in_ranges(ranges: &[DateRange]) -> Vec<i32> {
    let mut years: Vec<i32> = Vec::new();
    for range in ranges {
        let year = range.from.year();
        if !years.contains(&year) {
            years.push(year);
        }
    }

    years
}

/// Orders by start date. Equal starts compare as `Less`, never `Equal`.
///
/// This is not a total order; sort with `sort_by_key(|r| r.from)` instead of
/// passing it to `sort_by`.
pub fn compare_by_from(a: &DateRange, b: &DateRange) -> Ordering {
    if a.from <= b.from {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Orders by end date. Equal ends compare as `Less`, never `Equal`.
///
/// Not a total order either.
pub fn compare_by_to(a: &DateRange, b: &DateRange) -> Ordering {
    if a.to <= b.to {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Whether any two ranges overlap once sorted by start date.
///
/// With `from_can_equal_previous_to`, a range may start on the day the
/// previous one ends.
pub fn ranges_collide(ranges: &[DateRange], from_can_equal_previous_to: bool) -> bool {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| range.from);

    sorted.windows(2).any(|pair| {
        if from_can_equal_previous_to {
            pair[0].to > pair[1].from
        } else {
            pair[0].to >= pair[1].from
        }
    })
}

pub fn dates_collide_with_ranges(dates: &[NaiveDate], ranges: &[DateRange]) -> bool {
    dates
        .iter()
        .any(|date| ranges.iter().any(|range| date_in_range(*date, range)))
}

pub fn date_within_optional_range(date: NaiveDate, range: &MaybeDateRange) -> bool {
    match (range.from, range.to) {
        (Some(from), Some(to)) => date_in_range(date, &DateRange { from, to }),
        (Some(from), None) => date >= from,
        (None, Some(to)) => date <= to,
        (None, None) => true,
    }
}

pub fn date_in_range(date: NaiveDate, range: &DateRange) -> bool {
    range.from <= date && date <= range.to
}

pub fn date_inside_range(date: NaiveDate, range: &DateRange) -> bool {
    range.from < date && date < range.to
}

/// The smallest range covering all of `ranges`.
pub fn union_range(ranges: &[DateRange]) -> Option<DateRange> {
    let from = ranges.iter().map(|range| range.from).min()?;
    let to = ranges.iter().map(|range| range.to).max()?;
    Some(DateRange { from, to })
}

/// Uncovered days between consecutive ranges, in the order given.
pub fn gaps_between_ranges(ranges: &[DateRange]) -> Vec<DateRange> {
    ranges
        .windows(2)
        .filter_map(|pair| {
            let from = pair[0].to.checked_add_days(Days::new(1))?;
            let to = pair[1].from.checked_sub_days(Days::new(1))?;
            (from <= to).then_some(DateRange { from, to })
        })
        .collect()
}

/// `YYYY-MM-DD/YYYY-MM-DD`
pub fn range_to_iso_range(range: &DateRange) -> String {
    format!(
        "{}/{}",
        format_iso_date(range.from),
        format_iso_date(range.to)
    )
}

pub fn iso_range_to_iso_dates(text: &str) -> Result<(String, String)> {
    match text.split_once('/') {
        Some((from, to)) if !to.contains('/') => Ok((from.to_string(), to.to_string())),
        _ => Err(Error::InvalidIsoDateRange(text.to_string())),
    }
}

pub fn iso_range_to_range(text: &str) -> Result<DateRange> {
    let (from, to) = iso_range_to_iso_dates(text)?;
    Ok(DateRange {
        from: parse_iso_date(&from)?,
        to: parse_iso_date(&to)?,
    })
}

pub fn iso_dates_in_iso_range_weekend_excluded(text: &str) -> Result<Vec<String>> {
    let range = iso_range_to_range(text)?;
    Ok(dates_in_range(&range, true)?
        .into_iter()
        .map(format_iso_date)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        parse_iso_date(text).unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange {
            from: date(from),
            to: date(to),
        }
    }

    #[test]
    fn single_week() {
        let week = range("2021-01-04", "2021-01-10");
        assert_eq!(weeks_in_range(&week).unwrap(), vec![week]);
    }

    #[test]
    fn sunday_to_sunday_gives_two_weeks() {
        let weeks = weeks_in_range(&range("2021-01-03", "2021-01-10")).unwrap();
        assert_eq!(
            weeks,
            vec![
                range("2021-01-03", "2021-01-03"),
                range("2021-01-04", "2021-01-10"),
            ]
        );
    }

    #[test]
    fn sunday_to_monday_gives_three_weeks() {
        let weeks = weeks_in_range(&range("2021-01-03", "2021-01-11")).unwrap();
        assert_eq!(
            weeks,
            vec![
                range("2021-01-03", "2021-01-03"),
                range("2021-01-04", "2021-01-10"),
                range("2021-01-11", "2021-01-11"),
            ]
        );
    }

    #[test]
    fn partial_last_week() {
        let weeks = weeks_in_range(&range("2021-01-06", "2021-01-13")).unwrap();
        assert_eq!(
            weeks,
            vec![
                range("2021-01-06", "2021-01-10"),
                range("2021-01-11", "2021-01-13"),
            ]
        );
    }

    #[test]
    fn single_day_week() {
        let day = range("2021-01-06", "2021-01-06");
        assert_eq!(weeks_in_range(&day).unwrap(), vec![day]);
    }

    #[test]
    fn inverted_range_fails_fast() {
        let inverted = range("2021-01-10", "2021-01-04");
        let expected = Err(Error::InvertedRange {
            from: date("2021-01-10"),
            to: date("2021-01-04"),
        });
        assert_eq!(weeks_in_range(&inverted), expected);
        assert!(months_in_range(&inverted, false).is_err());
        assert!(dates_in_range(&inverted, false).is_err());
        assert!(days_between(&inverted, true).is_err());
        assert!(DateRange::new(inverted.from, inverted.to).is_err());
    }

    #[test]
    fn plain_day_count_ignores_order() {
        let inverted = range("2021-02-03", "2021-02-01");
        assert_eq!(days_between(&inverted, false), Ok(3));
        assert_eq!(
            days_between(&range("2021-02-01", "2021-02-03"), false),
            Ok(3)
        );
    }

    #[test]
    fn partitions_stop_at_the_end_of_the_calendar() {
        let last = DateRange::single(NaiveDate::MAX);
        assert_eq!(months_in_range(&last, false).unwrap(), vec![last]);
        assert_eq!(months_in_range(&last, true).unwrap().len(), 1);
        assert_eq!(weeks_in_range(&last).unwrap(), vec![last]);
        assert_eq!(dates_in_range(&last, false).unwrap(), vec![NaiveDate::MAX]);

        let tail = DateRange {
            from: NaiveDate::MAX - Days::new(40),
            to: NaiveDate::MAX,
        };
        let weeks = weeks_in_range(&tail).unwrap();
        assert_eq!(weeks.last().unwrap().to, NaiveDate::MAX);
        let months = months_in_range(&tail, false).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[1].to, NaiveDate::MAX);
    }

    #[test]
    fn clipped_month() {
        let months = months_in_range(&range("2020-01-05", "2020-01-20"), false).unwrap();
        assert_eq!(months, vec![range("2020-01-05", "2020-01-20")]);
    }

    #[test]
    fn full_month() {
        let months = months_in_range(&range("2020-01-05", "2020-01-20"), true).unwrap();
        assert_eq!(months, vec![range("2020-01-01", "2020-01-31")]);
    }

    #[test]
    fn full_months_across_several_months() {
        let months = months_in_range(&range("2020-01-10", "2020-03-10"), true).unwrap();
        assert_eq!(
            months,
            vec![
                range("2020-01-01", "2020-01-31"),
                range("2020-02-01", "2020-02-29"),
                range("2020-03-01", "2020-03-31"),
            ]
        );
    }

    #[test]
    fn fifteen_months() {
        let months = months_in_range(&range("2020-01-10", "2021-03-10"), false).unwrap();
        assert_eq!(months.len(), 15);
        assert_eq!(months[0], range("2020-01-10", "2020-01-31"));
        assert_eq!(months[1], range("2020-02-01", "2020-02-29"));
        assert_eq!(months[14], range("2021-03-01", "2021-03-10"));
    }

    #[test]
    fn dates_with_and_without_weekends() {
        let all = dates_in_range(&range("2021-02-05", "2021-02-08"), false).unwrap();
        assert_eq!(
            all,
            vec![
                date("2021-02-05"),
                date("2021-02-06"),
                date("2021-02-07"),
                date("2021-02-08"),
            ]
        );
        let weekdays = dates_in_range(&range("2021-02-05", "2021-02-08"), true).unwrap();
        assert_eq!(weekdays, vec![date("2021-02-05"), date("2021-02-08")]);
    }

    #[test]
    fn counts_days_inclusive() {
        assert_eq!(
            days_between(&range("2021-02-01", "2021-02-01"), false),
            Ok(1)
        );
        assert_eq!(
            days_between(&range("2021-02-01", "2021-02-02"), false),
            Ok(2)
        );
        assert_eq!(
            days_between(&range("2021-02-01", "2021-02-03"), false),
            Ok(3)
        );
    }

    #[test]
    fn counts_weekdays_only() {
        assert_eq!(
            days_between(&range("2021-02-05", "2021-02-07"), true),
            Ok(1)
        );
        assert_eq!(
            days_between(&range("2021-02-05", "2021-02-08"), true),
            Ok(2)
        );
    }

    #[test]
    fn month_days_before_range() {
        let dates = dates_in_month_outside_range(
            date("2021-01-01"),
            &range("2021-01-04", "2021-01-31"),
        );
        assert_eq!(
            dates,
            vec![date("2021-01-01"), date("2021-01-02"), date("2021-01-03")]
        );
    }

    #[test]
    fn month_days_after_range() {
        let dates = dates_in_month_outside_range(
            date("2021-01-01"),
            &range("2021-01-01", "2021-01-28"),
        );
        assert_eq!(
            dates,
            vec![date("2021-01-29"), date("2021-01-30"), date("2021-01-31")]
        );
    }

    #[test]
    fn month_days_after_single_day_range() {
        let dates = dates_in_month_outside_range(
            date("2021-01-01"),
            &range("2021-01-01", "2021-01-01"),
        );
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], date("2021-01-02"));
        assert_eq!(dates[29], date("2021-01-31"));
    }

    #[test]
    fn month_days_around_range() {
        let dates = dates_in_month_outside_range(
            date("2021-01-15"),
            &range("2021-01-02", "2021-01-30"),
        );
        assert_eq!(dates, vec![date("2021-01-01"), date("2021-01-31")]);
    }

    #[test]
    fn week_ranges() {
        assert_eq!(
            week_range(date("2020-01-01"), false),
            range("2019-12-30", "2020-01-05")
        );
        assert_eq!(
            week_range(date("2020-01-01"), true),
            range("2019-12-30", "2020-01-03")
        );
    }

    #[test]
    fn week_of_date_within_month() {
        assert_eq!(
            week_of_date(date("2021-05-01"), false),
            range("2021-04-26", "2021-05-02")
        );
        assert_eq!(
            week_of_date(date("2021-05-01"), true),
            range("2021-05-01", "2021-05-02")
        );
        assert_eq!(
            week_of_date(date("2021-05-31"), true),
            range("2021-05-31", "2021-05-31")
        );
    }

    #[test]
    fn weeks_in_month_whole_weeks() {
        let weeks = weeks_in_month(date("2021-05-01"), true);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0], range("2021-04-26", "2021-05-02"));
        assert_eq!(weeks[5], range("2021-05-31", "2021-06-06"));
    }

    #[test]
    fn weeks_in_month_clipped() {
        let weeks = weeks_in_month(date("2021-05-01"), false);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0], range("2021-05-01", "2021-05-02"));
        assert_eq!(weeks[5], range("2021-05-31", "2021-05-31"));
    }

    #[test]
    fn dates_in_february() {
        let all = dates_in_month(date("2021-02-01"), false);
        assert_eq!(all.len(), 28);
        assert_eq!(all[27], date("2021-02-28"));

        let weekdays = dates_in_month(date("2021-02-01"), true);
        assert_eq!(weekdays.len(), 20);
        assert_eq!(weekdays[0], date("2021-02-01"));
        assert_eq!(weekdays[19], date("2021-02-26"));
    }

    #[test]
    fn distinct_years() {
        let ranges = [
            range("2021-01-01", "2021-01-02"),
            range("2020-01-01", "2021-01-02"),
            range("2021-03-01", "2022-01-02"),
        ];
        assert_eq!(years_in_ranges(&ranges), vec![2021, 2020]);
    }

    #[test]
    fn compares_by_from_and_to() {
        let a = range("2020-01-01", "2020-01-10");
        let b = range("2020-01-05", "2020-01-06");

        assert_eq!(compare_by_from(&a, &b), Ordering::Less);
        assert_eq!(compare_by_from(&b, &a), Ordering::Greater);
        assert_eq!(compare_by_to(&a, &b), Ordering::Greater);
        assert_eq!(compare_by_to(&b, &a), Ordering::Less);

        assert_eq!(compare_by_from(&a, &a), Ordering::Less);
        assert_eq!(compare_by_to(&b, &b), Ordering::Less);
    }

    #[test]
    fn collisions() {
        let apart = [
            range("2021-02-01", "2021-02-02"),
            range("2021-02-03", "2021-02-04"),
        ];
        assert!(!ranges_collide(&apart, false));

        let overlapping = [
            range("2021-02-01", "2021-02-02"),
            range("2021-02-03", "2021-02-04"),
            range("2021-02-02", "2021-02-03"),
        ];
        assert!(ranges_collide(&overlapping, false));
    }

    #[test]
    fn shared_boundary_day() {
        let touching = [
            range("2021-02-01", "2021-02-02"),
            range("2021-02-02", "2021-02-03"),
        ];
        assert!(!ranges_collide(&touching, true));
        assert!(ranges_collide(&touching, false));
        assert!(!ranges_collide(&[], false));
    }

    #[test]
    fn dates_against_ranges() {
        let ranges = [
            range("2021-01-01", "2021-01-05"),
            range("2021-01-10", "2021-01-15"),
        ];
        assert!(!dates_collide_with_ranges(&[date("2021-01-07")], &ranges));
        assert!(dates_collide_with_ranges(
            &[date("2021-01-07"), date("2021-01-15")],
            &ranges
        ));
        assert!(!dates_collide_with_ranges(&[date("2021-01-01")], &[]));
    }

    #[test]
    fn open_ended_ranges() {
        let from = date("2021-01-05");
        let to = date("2021-01-10");
        let open_to = MaybeDateRange {
            from: Some(from),
            to: None,
        };
        let open_from = MaybeDateRange {
            from: None,
            to: Some(to),
        };

        assert!(date_within_optional_range(from, &open_to));
        assert!(!date_within_optional_range(date("2021-01-04"), &open_to));
        assert!(date_within_optional_range(to, &open_from));
        assert!(!date_within_optional_range(date("2021-01-11"), &open_from));
        assert!(date_within_optional_range(
            date("1900-01-01"),
            &MaybeDateRange::default()
        ));
        assert!(!date_within_optional_range(
            date("2021-01-11"),
            &MaybeDateRange {
                from: Some(from),
                to: Some(to),
            }
        ));
    }

    #[test]
    fn inclusive_and_exclusive_containment() {
        let r = range("2021-01-05", "2021-01-10");
        assert!(date_in_range(date("2021-01-05"), &r));
        assert!(date_in_range(date("2021-01-10"), &r));
        assert!(date_in_range(date("2021-01-07"), &r));
        assert!(!date_in_range(date("2021-01-04"), &r));
        assert!(!date_in_range(date("2021-01-11"), &r));

        assert!(!date_inside_range(date("2021-01-05"), &r));
        assert!(!date_inside_range(date("2021-01-10"), &r));
        assert!(date_inside_range(date("2021-01-07"), &r));
    }

    #[test]
    fn union_of_ranges() {
        let ranges = [
            range("2021-03-01", "2021-03-05"),
            range("2021-01-01", "2021-01-05"),
            range("2021-02-01", "2021-04-05"),
        ];
        assert_eq!(
            union_range(&ranges),
            Some(range("2021-01-01", "2021-04-05"))
        );
        assert_eq!(union_range(&[]), None);
    }

    #[test]
    fn gaps_skip_adjacent_ranges() {
        let ranges = [
            range("2021-01-01", "2021-01-05"),
            range("2021-01-06", "2021-01-08"),
            range("2021-01-12", "2021-01-15"),
            range("2021-01-17", "2021-01-20"),
        ];
        assert_eq!(
            gaps_between_ranges(&ranges),
            vec![
                range("2021-01-09", "2021-01-11"),
                range("2021-01-16", "2021-01-16"),
            ]
        );
    }

    #[test]
    fn iso_range_text() {
        let r = range("2021-01-01", "2021-01-31");
        assert_eq!(range_to_iso_range(&r), "2021-01-01/2021-01-31");
        assert_eq!(iso_range_to_range("2021-01-01/2021-01-31"), Ok(r));
        assert_eq!(
            iso_range_to_iso_dates("2021-01-01/2021-01-31"),
            Ok(("2021-01-01".to_string(), "2021-01-31".to_string()))
        );
        assert!(iso_range_to_range("2021-01-01").is_err());
        let three_dates = "2021-01-01/2021-01-02/2021-01-03";
        assert!(iso_range_to_range(three_dates).is_err());
    }

    #[test]
    fn iso_weekdays_in_iso_range() {
        assert_eq!(
            iso_dates_in_iso_range_weekend_excluded("2021-02-05/2021-02-08").unwrap(),
            vec!["2021-02-05", "2021-02-08"]
        );
    }
}
