//! Normalization of hours/minutes durations and their ISO and decimal forms.
//!
//! Partial input ([`InputDuration`]) is resolved field by field. A field is
//! either absent (missing or empty text), a non-negative whole number, or
//! invalid. Invalid fields never raise: normalization falls back to zero and
//! only [`is_valid`] reports the problem.

use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    model::{Duration, DurationField, InputDuration},
    parser::parse_iso_duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldValue {
    Absent,
    Value(u32),
    Invalid,
}

fn resolve(field: Option<&DurationField>) -> FieldValue {
    match field {
        None => FieldValue::Absent,
        Some(DurationField::Integer(n)) => {
            u32::try_from(*n).map_or(FieldValue::Invalid, FieldValue::Value)
        }
        Some(DurationField::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                FieldValue::Absent
            } else if text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse().map_or(FieldValue::Invalid, FieldValue::Value)
            } else {
                FieldValue::Invalid
            }
        }
        Some(DurationField::Other(_)) => FieldValue::Invalid,
    }
}

fn resolve_both(duration: &InputDuration) -> (FieldValue, FieldValue) {
    (
        resolve(duration.hours.as_ref()),
        resolve(duration.minutes.as_ref()),
    )
}

/// Canonical form of `duration`; zero when either field is invalid.
pub fn normalize(duration: &InputDuration) -> Duration {
    match resolve_both(duration) {
        (FieldValue::Invalid, _) | (_, FieldValue::Invalid) => {
            log::trace!("invalid duration field in {:?}, using zero", duration);
            Duration::ZERO
        }
        (hours, minutes) => Duration::new(value_or_zero(hours), value_or_zero(minutes)),
    }
}

fn value_or_zero(value: FieldValue) -> u32 {
    match value {
        FieldValue::Value(n) => n,
        FieldValue::Absent | FieldValue::Invalid => 0,
    }
}

/// Whether `duration` is usable as a time of day component: at least one
/// field set, no invalid field, and fewer than 60 minutes.
pub fn is_valid(duration: Option<&InputDuration>) -> bool {
    let Some(duration) = duration else {
        return false;
    };

    match resolve_both(duration) {
        (FieldValue::Invalid, _) | (_, FieldValue::Invalid) => false,
        (FieldValue::Absent, FieldValue::Absent) => false,
        _ => normalize(duration).minutes < 60,
    }
}

pub fn is_zero(duration: &InputDuration) -> bool {
    normalize(duration).is_zero()
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PT{}H{}M", self.hours, self.minutes)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_iso_string(s)
    }
}

/// `PT{h}H{m}M` of the normalized fields. Never fails.
pub fn to_iso_string(duration: &InputDuration) -> String {
    normalize(duration).to_string()
}

/// Parses `PT{h}H{m}M`, keeping minutes of 60 and above as they are.
pub fn from_iso_string(text: &str) -> Result<Duration> {
    parse_iso_duration(text).map_err(|err| {
        log::debug!("failed to parse ISO duration {:?}: {}", text, err);
        Error::from(err)
    })
}

/// Like [`from_iso_string`], but `None` on malformed text.
pub fn iso_to_input_duration(text: &str) -> Option<InputDuration> {
    from_iso_string(text).ok().map(to_input_duration)
}

/// Text-valued partial form of `duration`.
pub fn to_input_duration(duration: Duration) -> InputDuration {
    InputDuration::new(duration.hours.to_string(), duration.minutes.to_string())
}

/// Compares the canonical ISO forms, so `1` and `"1"` are equal.
pub fn equal(a: Option<&InputDuration>, b: Option<&InputDuration>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => to_iso_string(a) == to_iso_string(b),
        _ => false,
    }
}

/// Hours as a decimal number, rounded to two decimals.
pub fn to_decimal(duration: &Duration) -> f64 {
    let decimal = f64::from(duration.hours) + f64::from(duration.minutes) / 60.0;
    (decimal * 100.0).round() / 100.0
}

pub fn input_to_decimal(duration: &InputDuration) -> f64 {
    to_decimal(&normalize(duration))
}

/// Whole hours plus the rounded minutes of the fraction.
///
/// The rounding can produce 60 minutes (e.g. `1.999`), which is returned
/// unchanged. Negative, non-finite and input beyond `u32::MAX` hours gives zero.
pub fn from_decimal(decimal: f64) -> Duration {
    if !decimal.is_finite() || decimal < 0.0 || decimal.floor() > f64::from(u32::MAX) {
        log::debug!("decimal duration {} out of range, using zero", decimal);
        return Duration::ZERO;
    }

    Duration::new(decimal.floor() as u32, (60.0 * decimal.fract()).round() as u32)
}

pub fn decimal_to_input_duration(decimal: f64) -> InputDuration {
    to_input_duration(from_decimal(decimal))
}

/// Adds hours and minutes separately; minutes are not carried into hours.
pub fn sum<'a>(durations: impl IntoIterator<Item = &'a InputDuration>) -> Duration {
    durations
        .into_iter()
        .map(normalize)
        .fold(Duration::ZERO, |acc, duration| Duration {
            hours: acc.hours.saturating_add(duration.hours),
            minutes: acc.minutes.saturating_add(duration.minutes),
        })
}
