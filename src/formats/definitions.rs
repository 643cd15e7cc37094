// src/formats/definitions.rs

//! The built-in format lists, one per [`FormatType`], in precedence order.
//!
//! Each [`FormatDefinition`] carries hardcoded self-test cases, checked in
//! `src/tests/definitions_tests.rs`.
//!
//! Ambiguous numeric dates are resolved month-before-day first: `m/d/yy`
//! precedes `d/m/yy`. Call [`remove_us_formats`] to prefer day-before-month.
//!
//! [`remove_us_formats`]: crate::formats::registry::remove_us_formats

use crate::common::{FormatStr, FormatStrings, FormatType};
#[cfg(any(debug_assertions, test))]
use crate::common::Value;
#[cfg(any(debug_assertions, test))]
use crate::data::record::Record;

/// A built-in format string with self-test cases.
#[derive(Debug, Eq, PartialEq)]
pub struct FormatDefinition {
    pub format: &'static FormatStr,
    pub format_type: FormatType,
    /// Hardcoded self-test cases: a value matched by `format` alone, and the
    /// record extracted with the default ambiguous year threshold.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'static [(&'static str, Record)],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

/// Declare a [`FormatDefinition`] more easily.
#[macro_export]
macro_rules! FD {
    (
        $format:literal,
        $format_type:expr,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        FormatDefinition {
            format: $format,
            format_type: $format_type,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
pub use FD;

#[cfg(any(debug_assertions, test))]
const fn hm(hour: Value, min: Value) -> Record {
    Record {
        hour: Some(hour),
        min: Some(min),
        ..Record::new()
    }
}

#[cfg(any(debug_assertions, test))]
const fn ymdhm(year: Value, month: Value, day: Value, hour: Value, min: Value) -> Record {
    Record {
        hour: Some(hour),
        min: Some(min),
        ..Record::from_ymd(year, month, day)
    }
}

pub const TIME_DEFINITIONS_LEN: usize = 11;
pub const DATE_DEFINITIONS_LEN: usize = 11;
pub const DATETIME_DEFINITIONS_LEN: usize = 19;
pub const FORMAT_DEFINITIONS_LEN: usize = TIME_DEFINITIONS_LEN + DATE_DEFINITIONS_LEN + DATETIME_DEFINITIONS_LEN;

/// Built-in formats of every type. Within a type, declaration order is
/// precedence order.
pub static FORMAT_DEFINITIONS: [FormatDefinition; FORMAT_DEFINITIONS_LEN] = [
    // ---------------------------------------------------------------------------------------------
    // time
    //
    FD!(
        "hh:nn:ss", FormatType::Time,
        &[
            ("10:11:12", Record::from_hms(10, 11, 12)),
            ("00:00:00", Record::from_hms(0, 0, 0)),
        ],
        line!(),
    ),
    FD!(
        "hh-nn-ss", FormatType::Time,
        &[("10-11-12", Record::from_hms(10, 11, 12))],
        line!(),
    ),
    FD!(
        "h:nn", FormatType::Time,
        &[
            ("9:05", hm(9, 5)),
            ("23:59", hm(23, 59)),
        ],
        line!(),
    ),
    FD!(
        "h.nn", FormatType::Time,
        &[("9.05", hm(9, 5))],
        line!(),
    ),
    FD!(
        "h nn", FormatType::Time,
        &[("9 05", hm(9, 5))],
        line!(),
    ),
    FD!(
        "h-nn", FormatType::Time,
        &[("9-05", hm(9, 5))],
        line!(),
    ),
    FD!(
        "h:nn_ampm", FormatType::Time,
        &[
            ("2:12 pm", hm(14, 12)),
            ("2:12pm", hm(14, 12)),
            ("12:00 am", hm(0, 0)),
            ("12:30 PM", hm(12, 30)),
        ],
        line!(),
    ),
    FD!(
        "h.nn_ampm", FormatType::Time,
        &[("2.12 P.M.", hm(14, 12))],
        line!(),
    ),
    FD!(
        "h nn_ampm", FormatType::Time,
        &[("2 12 am", hm(2, 12))],
        line!(),
    ),
    FD!(
        "h-nn_ampm", FormatType::Time,
        &[("12-30 pm", hm(12, 30))],
        line!(),
    ),
    FD!(
        "h_ampm", FormatType::Time,
        &[
            ("3 pm", Record { hour: Some(15), ..Record::new() }),
            ("12am", Record { hour: Some(0), ..Record::new() }),
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // date
    //
    FD!(
        "yyyy-mm-dd", FormatType::Date,
        &[("2000-01-02", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "yyyy/mm/dd", FormatType::Date,
        &[("2000/01/02", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "yyyy.mm.dd", FormatType::Date,
        &[("2000.01.02", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "m/d/yy", FormatType::Date,
        &[
            ("1/2/00", Record::from_ymd(2000, 1, 2)),
            ("12/31/1999", Record::from_ymd(1999, 12, 31)),
        ],
        line!(),
    ),
    FD!(
        "d/m/yy", FormatType::Date,
        &[
            ("2/1/00", Record::from_ymd(2000, 1, 2)),
            ("31/12/99", Record::from_ymd(1999, 12, 31)),
        ],
        line!(),
    ),
    FD!(
        r"m\d\yy", FormatType::Date,
        &[(r"1\2\29", Record::from_ymd(2029, 1, 2))],
        line!(),
    ),
    FD!(
        r"d\m\yy", FormatType::Date,
        &[(r"2\1\30", Record::from_ymd(1930, 1, 2))],
        line!(),
    ),
    FD!(
        "d-m-yy", FormatType::Date,
        &[("2-1-00", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "dd-mm-yyyy", FormatType::Date,
        &[("02-01-2000", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "d.m.yy", FormatType::Date,
        &[("2.1.00", Record::from_ymd(2000, 1, 2))],
        line!(),
    ),
    FD!(
        "d mmm yy", FormatType::Date,
        &[
            ("1 february 29", Record::from_ymd(2029, 2, 1)),
            ("2 Jan 2000", Record::from_ymd(2000, 1, 2)),
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // datetime
    //
    FD!(
        "yyyy-mm-dd hh:nn:ss", FormatType::Datetime,
        &[("2000-01-02 10:11:12", Record::from_ymdhms(2000, 1, 2, 10, 11, 12))],
        line!(),
    ),
    FD!(
        "yyyy-mm-dd h:nn", FormatType::Datetime,
        &[("2000-01-02 9:05", ymdhm(2000, 1, 2, 9, 5))],
        line!(),
    ),
    FD!(
        "yyyy-mm-dd h:nn_ampm", FormatType::Datetime,
        &[("2000-01-02 9:05 pm", ymdhm(2000, 1, 2, 21, 5))],
        line!(),
    ),
    FD!(
        "yyyy-mm-dd hh:nn:ss.u", FormatType::Datetime,
        &[
            (
                "2000-01-02 12:13:14.99",
                Record { usec: Some(990000), ..Record::from_ymdhms(2000, 1, 2, 12, 13, 14) },
            ),
            (
                "2000-01-02 12:13:14.000001",
                Record { usec: Some(1), ..Record::from_ymdhms(2000, 1, 2, 12, 13, 14) },
            ),
        ],
        line!(),
    ),
    FD!(
        "m/d/yy h:nn:ss", FormatType::Datetime,
        &[("1/2/00 1:02:03", Record::from_ymdhms(2000, 1, 2, 1, 2, 3))],
        line!(),
    ),
    FD!(
        "m/d/yy h:nn_ampm", FormatType::Datetime,
        &[("1/2/00 1:02 pm", ymdhm(2000, 1, 2, 13, 2))],
        line!(),
    ),
    FD!(
        "m/d/yy h:nn", FormatType::Datetime,
        &[("1/2/00 1:02", ymdhm(2000, 1, 2, 1, 2))],
        line!(),
    ),
    FD!(
        "d/m/yy hh:nn:ss", FormatType::Datetime,
        &[("2/1/00 01:02:03", Record::from_ymdhms(2000, 1, 2, 1, 2, 3))],
        line!(),
    ),
    FD!(
        "d/m/yy h:nn_ampm", FormatType::Datetime,
        &[("2/1/00 1:02 am", ymdhm(2000, 1, 2, 1, 2))],
        line!(),
    ),
    FD!(
        "d/m/yy h:nn", FormatType::Datetime,
        &[("2/1/00 1:02", ymdhm(2000, 1, 2, 1, 2))],
        line!(),
    ),
    FD!(
        "dd-mm-yyyy hh:nn:ss", FormatType::Datetime,
        &[("02-01-2000 10:11:12", Record::from_ymdhms(2000, 1, 2, 10, 11, 12))],
        line!(),
    ),
    FD!(
        "dd-mm-yyyy h:nn", FormatType::Datetime,
        &[("02-01-2000 9:05", ymdhm(2000, 1, 2, 9, 5))],
        line!(),
    ),
    FD!(
        "ddd, dd mmm yyyy hh:nn:ss zo", FormatType::Datetime,
        &[
            (
                "Sun, 02 Jan 2000 10:11:12 +1000",
                Record { offset: Some(36000), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
            ),
            (
                "Sunday, 02 January 2000 10:11:12 -0000",
                Record { offset: Some(0), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
            ),
        ],
        line!(),
    ),
    FD!(
        "ddd, dd mmm yyyy hh:nn:ss tz", FormatType::Datetime,
        &[("Sun, 02 Jan 2000 10:11:12 GMT", Record::from_ymdhms(2000, 1, 2, 10, 11, 12))],
        line!(),
    ),
    FD!(
        "ddd mmm d hh:nn:ss zo yyyy", FormatType::Datetime,
        &[(
            "Sun Jan 2 10:11:12 -1030 2000",
            Record { offset: Some(-37800), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
        )],
        line!(),
    ),
    FD!(
        "yyyy-mm-ddThh:nn:ssZ", FormatType::Datetime,
        &[("2000-01-02T10:11:12Z", Record::from_ymdhms(2000, 1, 2, 10, 11, 12))],
        line!(),
    ),
    FD!(
        "yyyy-mm-ddThh:nn:sszo", FormatType::Datetime,
        &[
            (
                "2000-01-02T10:11:12+10:00",
                Record { offset: Some(36000), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
            ),
            (
                "2000-01-02T10:11:12-0130",
                Record { offset: Some(-5400), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
            ),
        ],
        line!(),
    ),
    FD!(
        "yyyy-mm-ddThh:nn:ss.u", FormatType::Datetime,
        &[(
            "2000-01-02T10:11:12.123456",
            Record { usec: Some(123456), ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12) },
        )],
        line!(),
    ),
    FD!(
        "yyyy-mm-ddThh:nn:ss.uzo", FormatType::Datetime,
        &[(
            "2000-01-02T10:11:12.5-05:00",
            Record {
                usec: Some(500000),
                offset: Some(-18000),
                ..Record::from_ymdhms(2000, 1, 2, 10, 11, 12)
            },
        )],
        line!(),
    ),
];

/// Built-in format definitions of `format_type`, in precedence order.
pub fn definitions(format_type: FormatType) -> impl Iterator<Item = &'static FormatDefinition> {
    FORMAT_DEFINITIONS
        .iter()
        .filter(move |fd| fd.format_type == format_type)
}

/// Built-in format strings of `format_type`, in precedence order.
pub fn default_formats(format_type: FormatType) -> FormatStrings {
    definitions(format_type)
        .map(|fd| fd.format.to_string())
        .collect()
}
