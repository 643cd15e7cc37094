// src/formats/format.rs

//! Compile one format string into a regex fragment with ordered capture
//! groups plus an extractor that maps captured strings to a [`Record`].
//!
//! For example, format `"d mmm yy"` compiles to regex fragment
//! `([0-9]{1,2}) ([[:alpha:]]{3,9}) ([0-9]{4}|[0-9]{2})` with captured fields
//! `[Day, Month, Year]`.

use crate::common::{
    ExtractError,
    FormatError,
    FormatStr,
    FormatString,
    ResultFormat,
    ResultMatch,
    Value,
};
use crate::data::record::{
    full_hour,
    microseconds,
    month_index,
    offset_in_seconds,
    unambiguous_year,
    value_from_digits,
    Record,
};
use crate::data::token::{tokenize, Field, Segment};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

use ::more_asserts::debug_assert_le;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Captured values of one format, in capture group order. A value is `None`
/// if its group did not participate in the match.
pub type CapturedValues<'a> = [Option<&'a str>];

/// Maps captured values, in capture order, to a [`Record`]. The second
/// argument is the ambiguous year threshold.
///
/// Built once per [`Format`] by [`build_extractor`].
pub type Extractor = Box<dyn Fn(&CapturedValues<'_>, Value) -> Result<Record, ExtractError> + Send + Sync>;

/// Build the [`Extractor`] for a format capturing `fields`, in capture order.
///
/// Each resolved value lands in its fixed record slot regardless of where its
/// token appeared in the format.
pub fn build_extractor(fields: Vec<Field>) -> Extractor {
    let meridian_at: Option<usize> = fields
        .iter()
        .position(|field| *field == Field::Meridian);

    Box::new(
        move |values: &[Option<&str>], century_threshold: Value| -> Result<Record, ExtractError> {
            debug_assert_le!(values.len(), fields.len(), "more values than fields");
            let meridian: Option<&str> = match meridian_at {
                Some(at) => values.get(at).copied().flatten(),
                None => None,
            };
            let mut record = Record::default();
            for (field, value) in fields.iter().zip(values.iter()) {
                let raw: &str = match value {
                    Some(val) => *val,
                    None => continue,
                };
                match field {
                    Field::Year => record.year = Some(unambiguous_year(raw, century_threshold)?),
                    Field::Month => record.month = Some(month_index(raw)?),
                    Field::Day => record.day = Some(value_from_digits(raw)?),
                    Field::Hour => record.hour = Some(full_hour(value_from_digits(raw)?, meridian)),
                    Field::Min => record.min = Some(value_from_digits(raw)?),
                    Field::Sec => record.sec = Some(value_from_digits(raw)?),
                    Field::Usec => record.usec = Some(microseconds(raw)?),
                    Field::Meridian => {}
                    Field::Offset => record.offset = Some(offset_in_seconds(raw)?),
                }
            }

            Ok(record)
        },
    )
}

/// A compiled format string.
pub struct Format {
    format: FormatString,
    /// Regex fragment, not anchored, capture groups only around semantic
    /// tokens.
    regex_str: String,
    /// Semantic field of every token, in left-to-right order; `None` for
    /// tokens that are matched but not captured.
    token_order: Vec<Option<Field>>,
    /// Captured fields, in capture group order.
    fields: Vec<Field>,
    /// `regex_str` anchored at both ends, for matching this one format.
    regex: Regex,
    extractor: Extractor,
}

impl Format {
    /// Compile `format`.
    ///
    /// Fails if the format is empty, names one semantic field more than once,
    /// builds an invalid regex, or has literal text that adds capture groups.
    pub fn compile(format: &FormatStr) -> ResultFormat<Format> {
        defn!("({:?})", str_to_String_noraw(format));
        if format.is_empty() {
            defx!("empty format");
            return Err(FormatError::Compile {
                format: format.to_string(),
                regex: String::new(),
                reason: String::from("format is empty"),
            });
        }
        let segments: Vec<Segment> = tokenize(format);
        let mut regex_str: String = String::with_capacity(format.len() * 10);
        let mut token_order: Vec<Option<Field>> = Vec::with_capacity(segments.len());
        let mut fields: Vec<Field> = Vec::with_capacity(segments.len());
        for segment in segments.iter() {
            regex_str.push_str(segment.to_regex_fragment().as_str());
            let token = match segment {
                Segment::Token(token) => token,
                Segment::Literal(_) => continue,
            };
            if let Some(field) = token.field {
                if fields.contains(&field) {
                    defx!("field {} found more than once", field);
                    return Err(FormatError::DuplicateField {
                        format: format.to_string(),
                        field: field.as_str(),
                    });
                }
                fields.push(field);
            }
            token_order.push(token.field);
        }
        let anchored: String = format!(r"\A(?:{})\z", regex_str);
        let regex: Regex = match Regex::new(anchored.as_str()) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new({:?}) failed {}", anchored, err);
                return Err(FormatError::Compile {
                    format: format.to_string(),
                    regex: regex_str,
                    reason: err.to_string(),
                });
            }
        };
        // `captures_len` includes the implicit group for the entire match
        let found: usize = regex.captures_len() - 1;
        if found != fields.len() {
            defx!("capture groups {} != fields {}", found, fields.len());
            return Err(FormatError::CaptureMismatch {
                format: format.to_string(),
                expected: fields.len(),
                found,
            });
        }
        let extractor: Extractor = build_extractor(fields.clone());
        defx!("regex {:?}, fields {:?}", regex_str, fields);

        Ok(Format {
            format: format.to_string(),
            regex_str,
            token_order,
            fields,
            regex,
            extractor,
        })
    }

    pub fn format(&self) -> &FormatStr {
        self.format.as_str()
    }

    pub fn regex_str(&self) -> &str {
        self.regex_str.as_str()
    }

    pub fn token_order(&self) -> &[Option<Field>] {
        self.token_order.as_slice()
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_slice()
    }

    /// Count of capture groups in [`regex_str`](Format::regex_str).
    pub fn capture_count(&self) -> usize {
        self.fields.len()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Run the extractor over `values`, which are in capture order.
    pub fn process(
        &self,
        values: &CapturedValues<'_>,
        century_threshold: Value,
    ) -> Result<Record, ExtractError> {
        (self.extractor)(values, century_threshold)
    }

    /// Match the entire `value` against this one format.
    pub fn match_str(
        &self,
        value: &str,
        century_threshold: Value,
    ) -> ResultMatch<Record, ExtractError> {
        defn!("format {:?}, value {:?}", self.format, str_to_String_noraw(value));
        let captures = match self.regex.captures(value) {
            Some(val) => val,
            None => {
                defx!("no match");
                return ResultMatch::NoMatch;
            }
        };
        let values: Vec<Option<&str>> = (1..=self.capture_count())
            .map(|index| captures.get(index).map(|m| m.as_str()))
            .collect();
        match self.process(values.as_slice(), century_threshold) {
            Ok(record) => {
                defx!("return Found({:?})", record);
                ResultMatch::Found(record)
            }
            Err(err) => {
                defx!("return Err({})", err);
                ResultMatch::Err(err)
            }
        }
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Format")
            .field("format", &self.format)
            .field("regex_str", &self.regex_str)
            .field("token_order", &self.token_order)
            .field("fields", &self.fields)
            .finish()
    }
}
