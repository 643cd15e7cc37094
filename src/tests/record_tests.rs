// src/tests/record_tests.rs

//! tests for `record.rs`

use crate::common::{ExtractError, Value};
use crate::data::record::{
    full_hour,
    microseconds,
    month_index,
    offset_in_seconds,
    unambiguous_year,
    value_from_digits,
    Record,
    AMBIGUOUS_YEAR_THRESHOLD_DEFAULT,
    RECORD_SLOTS,
    RECORD_SLOTS_OFFSET,
};

use ::test_case::test_case;

#[test]
fn test_record_new_is_default() {
    assert_eq!(Record::new(), Record::default());
    assert!(!Record::new().has_date());
    assert!(!Record::new().has_time());
}

#[test]
fn test_record_to_array() {
    let record = Record {
        usec: Some(7),
        offset: Some(-60),
        ..Record::from_ymdhms(2000, 1, 2, 3, 4, 5)
    };
    let array = record.to_array();
    assert_eq!(array.len(), RECORD_SLOTS_OFFSET);
    assert_eq!(
        array[..RECORD_SLOTS],
        [Some(2000), Some(1), Some(2), Some(3), Some(4), Some(5), Some(7)]
    );
    assert_eq!(array[RECORD_SLOTS], Some(-60));
}

#[test]
fn test_record_clear_time() {
    let mut record = Record {
        usec: Some(1),
        offset: Some(3600),
        ..Record::from_ymdhms(2000, 1, 2, 3, 4, 5)
    };
    assert!(record.has_time());
    record.clear_time();
    assert!(!record.has_time());
    assert_eq!(record, Record { offset: Some(3600), ..Record::from_ymd(2000, 1, 2) });
}

#[test_case(Record::from_ymd(2000, 1, 2), "2000 1 2 - - - - -")]
#[test_case(Record::from_hms(10, 11, 12), "- - - 10 11 12 - -")]
#[test_case(Record::new(), "- - - - - - - -")]
fn test_record_display(
    record: Record,
    expect: &str,
) {
    assert_eq!(record.to_string(), expect);
}

#[test_case("0", Ok(0))]
#[test_case("007", Ok(7))]
#[test_case("2000", Ok(2000))]
#[test_case("", Err(ExtractError::NotANumber(String::from(""))); "empty")]
#[test_case("1a", Err(ExtractError::NotANumber(String::from("1a"))))]
#[test_case("-1", Err(ExtractError::NotANumber(String::from("-1"))); "negative")]
#[test_case("١", Err(ExtractError::NotANumber(String::from("١"))); "arabic-indic digit")]
fn test_value_from_digits(
    raw: &str,
    expect: Result<Value, ExtractError>,
) {
    assert_eq!(value_from_digits(raw), expect);
}

#[test_case("29", 30, 2029)]
#[test_case("30", 30, 1930)]
#[test_case("00", 30, 2000)]
#[test_case("99", 30, 1999)]
#[test_case("39", 40, 2039)]
#[test_case("40", 40, 1940)]
#[test_case("2029", 30, 2029; "four digits verbatim")]
#[test_case("1850", 30, 1850; "four digits verbatim old")]
#[test_case("05", 0, 1905; "threshold zero")]
fn test_unambiguous_year(
    raw: &str,
    threshold: Value,
    expect: Value,
) {
    assert_eq!(unambiguous_year(raw, threshold), Ok(expect));
}

#[test]
fn test_unambiguous_year_default_threshold() {
    assert_eq!(AMBIGUOUS_YEAR_THRESHOLD_DEFAULT, 30);
}

#[test_case("1", 1)]
#[test_case("01", 1)]
#[test_case("12", 12)]
#[test_case("Jan", 1)]
#[test_case("jan", 1; "jan lowercase")]
#[test_case("DEC", 12)]
#[test_case("May", 5)]
#[test_case("february", 2)]
#[test_case("SEPTEMBER", 9)]
fn test_month_index(
    raw: &str,
    expect: Value,
) {
    assert_eq!(month_index(raw), Ok(expect));
}

#[test_case("Foo")]
#[test_case("Janu"; "partial name")]
#[test_case("Sept"; "four letter abbreviation")]
#[test_case("Ja")]
fn test_month_index_unknown(raw: &str) {
    assert_eq!(month_index(raw), Err(ExtractError::UnknownMonth(String::from(raw))));
}

#[test_case(2, Some("pm"), 14)]
#[test_case(2, Some("PM"), 14; "uppercase PM")]
#[test_case(2, Some("p.m."), 14)]
#[test_case(11, Some("Pm"), 23)]
#[test_case(12, Some("pm"), 12; "noon")]
#[test_case(12, Some("am"), 0; "midnight")]
#[test_case(12, Some("A.M."), 0; "midnight dots")]
#[test_case(2, Some("am"), 2)]
#[test_case(0, Some("pm"), 0; "zero pm unchanged")]
#[test_case(13, Some("pm"), 13; "thirteen pm unchanged")]
#[test_case(14, None, 14)]
fn test_full_hour(
    hour: Value,
    meridian: Option<&str>,
    expect: Value,
) {
    assert_eq!(full_hour(hour, meridian), expect);
}

#[test_case("99", 990000)]
#[test_case("1", 100000)]
#[test_case("5", 500000)]
#[test_case("123456", 123456)]
#[test_case("000001", 1)]
#[test_case("1234567", 123456; "truncated to six")]
fn test_microseconds(
    raw: &str,
    expect: Value,
) {
    assert_eq!(microseconds(raw), Ok(expect));
}

#[test_case("+10:00", 36000)]
#[test_case("+1000", 36000)]
#[test_case("-1030", -37800)]
#[test_case("-05:00", -18000)]
#[test_case("+0000", 0)]
#[test_case("-0000", 0; "negative zero")]
fn test_offset_in_seconds(
    raw: &str,
    expect: Value,
) {
    assert_eq!(offset_in_seconds(raw), Ok(expect));
}

#[test_case(""; "empty")]
#[test_case("1000"; "no sign")]
#[test_case("+10"; "short")]
#[test_case("+10:0a"; "not digits")]
#[test_case("+10:000"; "long")]
fn test_offset_in_seconds_bad(raw: &str) {
    assert_eq!(offset_in_seconds(raw), Err(ExtractError::BadOffset(String::from(raw))));
}
