// src/data/record.rs

//! The canonical record and the resolution rules that turn captured strings
//! into record slot values.
//!
//! A [`Record`] is independent of the format that produced it. Each slot is
//! either a value or unset; an unset slot means no token of the matched format
//! fed that slot (it is not zero).

use crate::common::{ExtractError, Value, ValueOpt};

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Two digit years less than this resolve to `20xx`, otherwise `19xx`.
pub const AMBIGUOUS_YEAR_THRESHOLD_DEFAULT: Value = 30;

/// Count of slots `year` through `usec`.
pub const RECORD_SLOTS: usize = 7;

/// Count of slots `year` through `offset`.
pub const RECORD_SLOTS_OFFSET: usize = 8;

/// The canonical record: `(year, month, day, hour, min, sec, usec, offset)`.
///
/// `offset` is signed seconds east of UTC.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Record {
    pub year: ValueOpt,
    pub month: ValueOpt,
    pub day: ValueOpt,
    pub hour: ValueOpt,
    pub min: ValueOpt,
    pub sec: ValueOpt,
    pub usec: ValueOpt,
    pub offset: ValueOpt,
}

impl Record {
    /// A record with every slot unset.
    pub const fn new() -> Record {
        Record {
            year: None,
            month: None,
            day: None,
            hour: None,
            min: None,
            sec: None,
            usec: None,
            offset: None,
        }
    }

    /// A record with the time slots `hour`, `min`, `sec` set and everything
    /// else unset.
    pub const fn from_hms(hour: Value, min: Value, sec: Value) -> Record {
        Record {
            hour: Some(hour),
            min: Some(min),
            sec: Some(sec),
            ..Record::new()
        }
    }

    /// A record with the date slots set and everything else unset.
    pub const fn from_ymd(year: Value, month: Value, day: Value) -> Record {
        Record {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            hour: None,
            min: None,
            sec: None,
            usec: None,
            offset: None,
        }
    }

    /// A record with date and time slots set; `usec` and `offset` unset.
    pub const fn from_ymdhms(
        year: Value,
        month: Value,
        day: Value,
        hour: Value,
        min: Value,
        sec: Value,
    ) -> Record {
        Record {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            hour: Some(hour),
            min: Some(min),
            sec: Some(sec),
            usec: None,
            offset: None,
        }
    }

    /// All eight slots in canonical order.
    pub const fn to_array(&self) -> [ValueOpt; RECORD_SLOTS_OFFSET] {
        [self.year, self.month, self.day, self.hour, self.min, self.sec, self.usec, self.offset]
    }

    /// Does any of `year`, `month`, `day` have a value?
    pub const fn has_date(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    /// Does any of `hour`, `min`, `sec`, `usec` have a value?
    pub const fn has_time(&self) -> bool {
        self.hour.is_some() || self.min.is_some() || self.sec.is_some() || self.usec.is_some()
    }

    /// Unset `hour`, `min`, `sec`, `usec`.
    pub fn clear_time(&mut self) {
        self.hour = None;
        self.min = None;
        self.sec = None;
        self.usec = None;
    }
}

impl fmt::Display for Record {
    /// Unset slots print as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for slot in self.to_array().iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match slot {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "-")?,
            }
        }

        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// semantic field resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Lowercase full month names, index `0` is January.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Coerce an all ASCII digit string to a [`Value`].
pub fn value_from_digits(raw: &str) -> Result<Value, ExtractError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractError::NotANumber(raw.to_string()));
    }
    raw.parse::<Value>()
        .map_err(|_| ExtractError::NotANumber(raw.to_string()))
}

/// Four digit years are used verbatim. Two digit years `v` resolve to
/// `2000 + v` when `v < threshold`, else `1900 + v`.
pub fn unambiguous_year(
    raw: &str,
    threshold: Value,
) -> Result<Value, ExtractError> {
    let year: Value = value_from_digits(raw)?;
    if raw.len() > 2 {
        return Ok(year);
    }
    if year < threshold {
        Ok(2000 + year)
    } else {
        Ok(1900 + year)
    }
}

/// Numeric months coerce directly. Names of three letters match the month
/// abbreviation, longer names must match the full month name. Case is
/// ignored.
pub fn month_index(raw: &str) -> Result<Value, ExtractError> {
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return value_from_digits(raw);
    }
    let name: String = raw.to_ascii_lowercase();
    let found: Option<usize> = match name.len() {
        0..=2 => None,
        3 => MONTH_NAMES
            .iter()
            .position(|full| full[..3] == name),
        _ => MONTH_NAMES
            .iter()
            .position(|full| *full == name),
    };
    match found {
        Some(index) => Ok(index as Value + 1),
        None => Err(ExtractError::UnknownMonth(raw.to_string())),
    }
}

/// Adjust a 12-hour clock `hour` by `meridian` (`"am"`, `"P.M."`, ...).
///
/// No range validation is done here.
pub fn full_hour(
    hour: Value,
    meridian: Option<&str>,
) -> Value {
    let meridian: String = match meridian {
        Some(val) => val
            .chars()
            .filter(|c| *c != '.')
            .collect::<String>()
            .to_ascii_lowercase(),
        None => return hour,
    };
    match (meridian.as_str(), hour) {
        ("pm", 1..=11) => hour + 12,
        ("am", 12) => 0,
        _ => hour,
    }
}

/// Right-pad the fraction digits to six places, e.g. `"99"` is `990000`.
pub fn microseconds(raw: &str) -> Result<Value, ExtractError> {
    value_from_digits(raw)?;
    let mut padded: String = raw
        .chars()
        .take(6)
        .collect();
    while padded.len() < 6 {
        padded.push('0');
    }

    value_from_digits(padded.as_str())
}

/// `"+HH:MM"` or `"+HHMM"` as signed total seconds.
pub fn offset_in_seconds(raw: &str) -> Result<Value, ExtractError> {
    let sign: Value = match raw.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(ExtractError::BadOffset(raw.to_string())),
    };
    let digits: String = raw[1..]
        .chars()
        .filter(|c| *c != ':')
        .collect();
    if digits.len() != 4 {
        return Err(ExtractError::BadOffset(raw.to_string()));
    }
    let hours: Value = value_from_digits(&digits[..2]).map_err(|_| ExtractError::BadOffset(raw.to_string()))?;
    let minutes: Value = value_from_digits(&digits[2..]).map_err(|_| ExtractError::BadOffset(raw.to_string()))?;

    Ok(sign * (hours * 3600 + minutes * 60))
}
