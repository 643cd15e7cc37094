// src/formats/parser.rs

//! Parse a candidate string against the compiled catalogs.
//!
//! Parsing a string requires:
//! 1. choosing the catalogs to try, in order, from the requested
//!    [`FormatType`] and the string length (see [`format_types_to_try`])
//! 2. matching the string against each catalog in turn; the first catalog
//!    that matches is authoritative
//! 3. extracting the canonical [`Record`] from the matched alternative
//! 4. post-processing: a `date` request clears the time slots, the offset
//!    slot is cleared unless requested
//!
//! No match and a failed extraction both result in `None`.

use crate::common::{FormatString, FormatType, ResultMatch, Value};
use crate::data::record::{Record, AMBIGUOUS_YEAR_THRESHOLD_DEFAULT};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::formats::formatset::{FormatSet, FormatSets, Matched};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Values shorter than this many characters requested as `datetime` are
/// tried against the `date` catalog first.
pub const DATE_LEN_THRESHOLD: usize = 11;

/// Per-call parse settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// Reserved. Matching is always against the entire (trimmed) value.
    pub strict: bool,
    /// Keep the offset slot when the matched format has an offset token.
    pub include_offset: bool,
    /// Two digit years less than this resolve to `20xx`, otherwise `19xx`.
    pub century_threshold: Value,
    /// Match only this registered format of the requested type.
    pub format: Option<FormatString>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict: true,
            include_offset: false,
            century_threshold: AMBIGUOUS_YEAR_THRESHOLD_DEFAULT,
            format: None,
        }
    }
}

/// A successful parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parsed {
    pub record: Record,
    /// Catalog that matched; may differ from the requested type.
    pub format_type: FormatType,
    /// Format that matched.
    pub format: FormatString,
}

/// Catalogs to try, in order, for a `value` requested as `format_type`.
///
/// Short values requested as `datetime` are far more likely bare dates.
pub fn format_types_to_try(
    format_type: FormatType,
    value: &str,
) -> &'static [FormatType] {
    match format_type {
        FormatType::Time => &[FormatType::Time, FormatType::Datetime],
        FormatType::Date => &[FormatType::Date, FormatType::Datetime],
        FormatType::Datetime => {
            if value.chars().count() < DATE_LEN_THRESHOLD {
                &[FormatType::Date, FormatType::Datetime]
            } else {
                &[FormatType::Datetime, FormatType::Date]
            }
        }
    }
}

fn to_parsed(
    matched: Matched<'_>,
    format_type: FormatType,
) -> Parsed {
    Parsed {
        record: matched.record,
        format_type,
        format: matched.format.to_string(),
    }
}

/// Parse `value` as `format_type` against catalogs `sets`.
///
/// Leading and trailing whitespace of `value` is ignored.
pub fn parse_sets(
    sets: &FormatSets,
    value: &str,
    format_type: FormatType,
    options: &ParseOptions,
) -> Option<Parsed> {
    defn!("({}, {:?}, {:?})", format_type, str_to_String_noraw(value), options);
    let value: &str = value.trim();
    let mut parsed: Parsed = match options.format.as_ref() {
        Some(format) => {
            let set: &FormatSet = &sets[format_type.index()];
            match set.match_format(format, value, options.century_threshold) {
                ResultMatch::Found(matched) => to_parsed(matched, format_type),
                ResultMatch::NoMatch => {
                    defx!("format {:?} no match, return None", format);
                    return None;
                }
                ResultMatch::Err(_err) => {
                    defx!("format {:?} extraction failed {}, return None", format, _err);
                    return None;
                }
            }
        }
        None => {
            let mut found: Option<Parsed> = None;
            for type_ in format_types_to_try(format_type, value).iter() {
                let set: &FormatSet = &sets[type_.index()];
                match set.match_str(value, options.century_threshold) {
                    ResultMatch::Found(matched) => {
                        found = Some(to_parsed(matched, *type_));
                        break;
                    }
                    ResultMatch::NoMatch => {
                        defo!("{} catalog no match", type_);
                    }
                    ResultMatch::Err(_err) => {
                        defx!("{} catalog extraction failed {}, return None", type_, _err);
                        return None;
                    }
                }
            }
            match found {
                Some(val) => val,
                None => {
                    defx!("no catalog matched, return None");
                    return None;
                }
            }
        }
    };
    if format_type == FormatType::Date {
        parsed.record.clear_time();
    }
    if !options.include_offset {
        parsed.record.offset = None;
    }
    defx!("return {:?}", parsed);

    Some(parsed)
}
