// src/tests/common_tests.rs

//! tests for `common.rs`

#![allow(non_snake_case)]

use crate::common::{
    ExtractError,
    FormatError,
    FormatType,
    ResultMatch,
    FORMAT_TYPES,
};

use ::test_case::test_case;

#[test]
fn test_FORMAT_TYPES_index() {
    for (at, format_type) in FORMAT_TYPES.iter().enumerate() {
        assert_eq!(format_type.index(), at);
    }
}

#[test_case("time", FormatType::Time)]
#[test_case("Date", FormatType::Date)]
#[test_case("DATETIME", FormatType::Datetime)]
fn test_FormatType_from_str(
    s: &str,
    expect: FormatType,
) {
    assert_eq!(s.parse::<FormatType>(), Ok(expect));
    assert_eq!(expect.to_string(), s.to_ascii_lowercase());
}

#[test]
fn test_FormatType_from_str_err() {
    assert!("timestamp".parse::<FormatType>().is_err());
    assert!("".parse::<FormatType>().is_err());
}

#[test]
fn test_FormatError_display() {
    let err = FormatError::NotFound {
        format_type: FormatType::Date,
        format: String::from("d/m/yy"),
    };
    assert_eq!(err.to_string(), r#"Format "d/m/yy" not found in date formats"#);
    let err = FormatError::AnchorNotFound {
        format_type: FormatType::Time,
        format: String::from("h"),
    };
    assert_eq!(err.to_string(), r#"Format for before option "h" was not found in time formats"#);
    let err = FormatError::DuplicateField {
        format: String::from("hh:hh"),
        field: "hour",
    };
    assert_eq!(err.to_string(), r#"The format "hh:hh" names field hour more than once"#);
}

#[test]
fn test_ResultMatch() {
    let found: ResultMatch<u8, ExtractError> = ResultMatch::Found(1);
    let no_match: ResultMatch<u8, ExtractError> = ResultMatch::NoMatch;
    let err: ResultMatch<u8, ExtractError> = ResultMatch::Err(ExtractError::BadOffset(String::from("+1")));
    assert!(found.is_found() && !found.is_no_match() && !found.is_err());
    assert!(no_match.is_no_match());
    assert!(err.is_err());
    assert_eq!(err.to_string(), r#"ResultMatch::Err(bad timezone offset "+1")"#);
    assert_eq!(found.ok(), Some(1));
    assert_eq!(no_match.ok(), None);
    assert_eq!(err.ok(), None);
}
