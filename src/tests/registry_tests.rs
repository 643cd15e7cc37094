// src/tests/registry_tests.rs

//! tests for `registry.rs`
//!
//! Only `test_global_registry` touches the process-wide registry; all other
//! tests use a private registry so they may run in parallel.

use crate::common::{FormatError, FormatStrings, FormatType};
use crate::data::record::Record;
use crate::formats::definitions::{
    default_formats,
    DATETIME_DEFINITIONS_LEN,
    DATE_DEFINITIONS_LEN,
    TIME_DEFINITIONS_LEN,
};
use crate::formats::parser::ParseOptions;
use crate::formats::registry::{
    add_formats,
    formats,
    is_us_format,
    parse,
    remove_formats,
    remove_us_formats,
    reset_formats,
    FormatRegistry,
    RegistrySnapshot,
};

use std::sync::Arc;

use ::si_trace_print::stack::stack_offset_set;
use ::si_trace_print::{defn, defo, defx};
use ::test_case::test_case;

fn new_registry() -> FormatRegistry {
    FormatRegistry::with_defaults().unwrap()
}

fn parse_date(
    registry: &FormatRegistry,
    value: &str,
) -> Option<Record> {
    registry.parse(value, FormatType::Date, &ParseOptions::default())
}

#[test]
fn test_with_defaults() {
    let registry = new_registry();
    assert_eq!(registry.version(), 0);
    assert_eq!(registry.formats(FormatType::Time).len(), TIME_DEFINITIONS_LEN);
    assert_eq!(registry.formats(FormatType::Date).len(), DATE_DEFINITIONS_LEN);
    assert_eq!(registry.formats(FormatType::Datetime).len(), DATETIME_DEFINITIONS_LEN);
    assert_eq!(registry.formats(FormatType::Date), default_formats(FormatType::Date));
    assert_eq!(registry.formats(FormatType::Date)[0], "yyyy-mm-dd");
}

#[test]
fn test_new_duplicate_format() {
    let empty: [&str; 0] = [];
    let result = FormatRegistry::new(&empty, &["d/m/yy", "d/m/yy"], &empty);
    assert_eq!(
        result.unwrap_err(),
        FormatError::AlreadyExists {
            format_type: FormatType::Date,
            format: String::from("d/m/yy"),
        }
    );
}

#[test]
fn test_new_bad_format() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        FormatRegistry::new(&["hh:hh"], &empty, &empty),
        Err(FormatError::DuplicateField { .. })
    ));
}

#[test]
fn test_add_formats_append() {
    let registry = new_registry();
    registry
        .add_formats(FormatType::Date, &["yyyy mm dd", "yyyymmdd"], None)
        .unwrap();
    let formats_: FormatStrings = registry.formats(FormatType::Date);
    assert_eq!(formats_.len(), DATE_DEFINITIONS_LEN + 2);
    assert_eq!(formats_[DATE_DEFINITIONS_LEN], "yyyy mm dd");
    assert_eq!(formats_[DATE_DEFINITIONS_LEN + 1], "yyyymmdd");
    assert_eq!(registry.version(), 1);
    assert_eq!(parse_date(&registry, "20000102"), Some(Record::from_ymd(2000, 1, 2)));
}

#[test]
fn test_add_formats_before_keeps_given_order() {
    let registry = new_registry();
    let at: usize = registry
        .formats(FormatType::Date)
        .iter()
        .position(|f| f == "m/d/yy")
        .unwrap();
    registry
        .add_formats(FormatType::Date, &["dd/mm/yyyy", "yyyy mm dd"], Some("m/d/yy"))
        .unwrap();
    let formats_: FormatStrings = registry.formats(FormatType::Date);
    assert_eq!(formats_[at], "dd/mm/yyyy");
    assert_eq!(formats_[at + 1], "yyyy mm dd");
    assert_eq!(formats_[at + 2], "m/d/yy");
    // the new format takes precedence over `m/d/yy`
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(Record::from_ymd(2000, 2, 1)));
}

#[test]
fn test_add_formats_other_types_unchanged() {
    let registry = new_registry();
    let before: Arc<RegistrySnapshot> = registry.snapshot();
    registry
        .add_formats(FormatType::Time, &["hh.nn.ss"], None)
        .unwrap();
    let after: Arc<RegistrySnapshot> = registry.snapshot();
    assert_eq!(before.formats(FormatType::Date), after.formats(FormatType::Date));
    assert_eq!(before.formats(FormatType::Datetime), after.formats(FormatType::Datetime));
    assert_ne!(before.formats(FormatType::Time), after.formats(FormatType::Time));
}

#[test_case(&["yyyy-mm-dd"], None; "existing")]
#[test_case(&["yyyy mm dd", "yyyy mm dd"], None; "repeated in given list")]
#[test_case(&["yyyy mm dd", "yyyy-mm-dd"], Some("d/m/yy"); "existing after new")]
fn test_add_formats_already_exists(
    new_formats: &[&str],
    before: Option<&str>,
) {
    stack_offset_set(Some(2));
    defn!("({:?}, {:?})", new_formats, before);
    let registry = new_registry();
    let result = registry.add_formats(FormatType::Date, new_formats, before);
    defo!("result {:?}", result);
    assert!(
        matches!(result, Err(FormatError::AlreadyExists { format_type: FormatType::Date, .. })),
        "expected AlreadyExists, got {:?}",
        result
    );
    assert_eq!(registry.formats(FormatType::Date), default_formats(FormatType::Date));
    assert_eq!(registry.version(), 0);
    defx!();
}

#[test]
fn test_add_formats_anchor_not_found() {
    let registry = new_registry();
    assert_eq!(
        registry.add_formats(FormatType::Time, &["hh.nn.ss"], Some("nope")),
        Err(FormatError::AnchorNotFound {
            format_type: FormatType::Time,
            format: String::from("nope"),
        })
    );
    assert_eq!(registry.formats(FormatType::Time), default_formats(FormatType::Time));
}

#[test]
fn test_add_formats_bad_format_unchanged() {
    let registry = new_registry();
    let result = registry.add_formats(FormatType::Time, &["hh.nn.ss", "hh:hh", "h (x)"], None);
    assert!(matches!(result, Err(FormatError::DuplicateField { .. })), "got {:?}", result);
    assert_eq!(registry.formats(FormatType::Time), default_formats(FormatType::Time));
    assert_eq!(registry.version(), 0);
}

#[test]
fn test_add_formats_capture_mismatch_unchanged() {
    let registry = new_registry();
    let result = registry.add_formats(FormatType::Time, &["h (x)"], None);
    assert!(matches!(result, Err(FormatError::CaptureMismatch { .. })), "got {:?}", result);
    assert_eq!(registry.formats(FormatType::Time), default_formats(FormatType::Time));
}

#[test]
fn test_remove_formats() {
    let registry = new_registry();
    registry
        .remove_formats(FormatType::Date, &["m/d/yy", "yyyy-mm-dd"])
        .unwrap();
    let formats_: FormatStrings = registry.formats(FormatType::Date);
    assert_eq!(formats_.len(), DATE_DEFINITIONS_LEN - 2);
    assert!(!formats_.contains(&String::from("m/d/yy")));
    assert!(!formats_.contains(&String::from("yyyy-mm-dd")));
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(Record::from_ymd(2000, 2, 1)));
    assert_eq!(parse_date(&registry, "2000-01-02"), None);
}

#[test]
fn test_remove_formats_not_found_unchanged() {
    let registry = new_registry();
    assert_eq!(
        registry.remove_formats(FormatType::Date, &["yyyy-mm-dd", "nope"]),
        Err(FormatError::NotFound {
            format_type: FormatType::Date,
            format: String::from("nope"),
        })
    );
    assert_eq!(registry.formats(FormatType::Date), default_formats(FormatType::Date));
    assert_eq!(registry.version(), 0);
}

#[test]
fn test_remove_formats_all() {
    let registry = new_registry();
    let all: FormatStrings = registry.formats(FormatType::Time);
    registry
        .remove_formats(FormatType::Time, &all)
        .unwrap();
    assert!(registry.formats(FormatType::Time).is_empty());
    assert!(registry.snapshot().format_set(FormatType::Time).is_empty());
    assert_eq!(
        registry.parse("10:11:12", FormatType::Time, &ParseOptions::default()),
        None
    );
}

#[test_case("m/d/yy", true)]
#[test_case(r"m\d\yy", true; "backslash")]
#[test_case("mm/dd/yyyy", true)]
#[test_case("m/d/yy h:nn", true)]
#[test_case("d/m/yy", false)]
#[test_case("mmm d yyyy", false)]
#[test_case("yyyy-mm-dd", false)]
#[test_case("m", false; "month only")]
fn test_is_us_format(
    format: &str,
    expect: bool,
) {
    assert_eq!(is_us_format(format), expect);
}

#[test]
fn test_remove_us_formats() {
    let registry = new_registry();
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(Record::from_ymd(2000, 1, 2)));
    registry.remove_us_formats().unwrap();
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(Record::from_ymd(2000, 2, 1)));
    for format_type in [FormatType::Date, FormatType::Datetime].iter() {
        for format in registry.formats(*format_type).iter() {
            assert!(!is_us_format(format), "{} format {:?} not removed", format_type, format);
        }
    }
    assert_eq!(registry.formats(FormatType::Date).len(), DATE_DEFINITIONS_LEN - 2);
    assert_eq!(registry.formats(FormatType::Datetime).len(), DATETIME_DEFINITIONS_LEN - 3);
    assert_eq!(registry.formats(FormatType::Time), default_formats(FormatType::Time));
    // idempotent
    registry.remove_us_formats().unwrap();
    assert_eq!(registry.formats(FormatType::Date).len(), DATE_DEFINITIONS_LEN - 2);
}

#[test]
fn test_reset() {
    let registry = new_registry();
    registry.remove_us_formats().unwrap();
    registry
        .add_formats(FormatType::Time, &["hh.nn.ss"], None)
        .unwrap();
    registry.reset().unwrap();
    assert_eq!(registry.formats(FormatType::Time), default_formats(FormatType::Time));
    assert_eq!(registry.formats(FormatType::Date), default_formats(FormatType::Date));
    assert_eq!(registry.formats(FormatType::Datetime), default_formats(FormatType::Datetime));
    assert_eq!(registry.version(), 3);
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(Record::from_ymd(2000, 1, 2)));
}

#[test]
fn test_snapshot_unaffected_by_mutation() {
    let registry = new_registry();
    let old: Arc<RegistrySnapshot> = registry.snapshot();
    registry.remove_us_formats().unwrap();
    let options = ParseOptions::default();
    assert_eq!(old.version(), 0);
    assert_eq!(old.formats(FormatType::Date), default_formats(FormatType::Date).as_slice());
    assert_eq!(
        old.parse("01/02/2000", FormatType::Date, &options),
        Some(Record::from_ymd(2000, 1, 2))
    );
    assert_eq!(
        registry.snapshot().parse("01/02/2000", FormatType::Date, &options),
        Some(Record::from_ymd(2000, 2, 1))
    );
}

#[test]
fn test_concurrent_parse_during_mutation() {
    let registry = new_registry();
    let month_first = Record::from_ymd(2000, 1, 2);
    let day_first = Record::from_ymd(2000, 2, 1);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let record = parse_date(&registry, "01/02/2000");
                    assert!(
                        record == Some(month_first) || record == Some(day_first),
                        "unexpected {:?}",
                        record
                    );
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..20 {
                registry.remove_us_formats().unwrap();
                registry.reset().unwrap();
            }
        });
    });
    assert_eq!(registry.version(), 40);
    assert_eq!(parse_date(&registry, "01/02/2000"), Some(month_first));
}

/// The only test that mutates the process-wide registry.
#[test]
fn test_global_registry() {
    let options = ParseOptions::default();
    reset_formats().unwrap();
    assert_eq!(formats(FormatType::Date), default_formats(FormatType::Date));
    assert_eq!(parse("01/02/2000", FormatType::Date, &options), Some(Record::from_ymd(2000, 1, 2)));

    remove_us_formats().unwrap();
    assert_eq!(parse("01/02/2000", FormatType::Date, &options), Some(Record::from_ymd(2000, 2, 1)));

    add_formats(FormatType::Date, &["m/d/yy"], Some("d/m/yy")).unwrap();
    assert_eq!(parse("01/02/2000", FormatType::Date, &options), Some(Record::from_ymd(2000, 1, 2)));
    assert!(add_formats(FormatType::Date, &["m/d/yy"], None).is_err());

    remove_formats(FormatType::Date, &["m/d/yy"]).unwrap();
    assert!(remove_formats(FormatType::Date, &["m/d/yy"]).is_err());
    assert_eq!(parse("01/02/2000", FormatType::Date, &options), Some(Record::from_ymd(2000, 2, 1)));

    reset_formats().unwrap();
    assert_eq!(formats(FormatType::Datetime), default_formats(FormatType::Datetime));
}
