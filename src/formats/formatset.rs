// src/formats/formatset.rs

//! Combine every format of one [`FormatType`] into a single alternation
//! regex, a "catalog".
//!
//! Each alternative is wrapped in its own capture group, the "wrapper group".
//! For formats `f1`, `f2`, the catalog regex is
//! `\A(?:(f1)|(f2))\z`. The capture group index of each wrapper group is
//! recorded at compile time so a match is attributed to its format by which
//! wrapper group participated, and the format's own captures are sliced from
//! the groups directly following its wrapper group.
//!
//! Alternatives are tried in list order; the first matching alternative wins
//! even if a later alternative would also match.

use crate::common::{
    ExtractError,
    FormatError,
    FormatStr,
    FormatString,
    FormatType,
    ResultFormat,
    ResultMatch,
    Value,
};
use crate::data::record::Record;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
use crate::formats::format::Format;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ::itertools::Itertools; // adds `join` to iterators
use ::more_asserts::debug_assert_lt;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// One compiled format within a [`FormatSet`].
#[derive(Debug)]
pub struct Alternative {
    pub format: Format,
    /// Capture group index of this alternative's wrapper group within the
    /// catalog regex. The format's own captures are at
    /// `wrapper_index + 1 ..= wrapper_index + format.capture_count()`.
    pub wrapper_index: usize,
}

impl Alternative {
    /// Capture count of all groups preceding this alternative's wrapper
    /// group, excluding the implicit whole-match group.
    pub fn capture_offset(&self) -> usize {
        self.wrapper_index - 1
    }
}

/// A compiled, immutable catalog for one [`FormatType`].
///
/// Replaced wholesale when the format list changes, never mutated.
pub struct FormatSet {
    format_type: FormatType,
    /// Catalog regex. `None` if there are no formats.
    regex: Option<Regex>,
    alternatives: Vec<Alternative>,
    /// Format string to index within `alternatives`.
    index: HashMap<FormatString, usize>,
}

/// The three catalogs, indexed by [`FormatType::index`].
pub type FormatSets = [Arc<FormatSet>; 3];

/// A successful catalog match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matched<'a> {
    pub record: Record,
    /// The format that matched.
    pub format: &'a FormatStr,
}

impl FormatSet {
    /// Compile every format of `formats`, in order, into one catalog.
    pub fn compile(
        format_type: FormatType,
        formats: &[FormatString],
    ) -> ResultFormat<FormatSet> {
        defn!("({}, {} formats)", format_type, formats.len());
        let mut alternatives: Vec<Alternative> = Vec::with_capacity(formats.len());
        let mut index: HashMap<FormatString, usize> = HashMap::with_capacity(formats.len());
        // group 0 is the entire match
        let mut captures_len: usize = 1;
        for format_string in formats.iter() {
            let format: Format = Format::compile(format_string)?;
            let wrapper_index: usize = captures_len;
            captures_len += 1 + format.capture_count();
            index
                .entry(format_string.clone())
                .or_insert(alternatives.len());
            alternatives.push(Alternative {
                format,
                wrapper_index,
            });
        }
        if alternatives.is_empty() {
            defx!("no formats");
            return Ok(FormatSet {
                format_type,
                regex: None,
                alternatives,
                index,
            });
        }
        let regex_str: String = format!(
            r"\A(?:{})\z",
            alternatives
                .iter()
                .map(|alt| format!("({})", alt.format.regex_str()))
                .join("|")
        );
        let regex: Regex = match Regex::new(regex_str.as_str()) {
            Ok(val) => val,
            Err(err) => {
                defx!("Regex::new failed {}", err);
                return Err(FormatError::Compile {
                    format: format!("{} formats", format_type),
                    regex: regex_str,
                    reason: err.to_string(),
                });
            }
        };
        if regex.captures_len() != captures_len {
            defx!("captures_len {} != expected {}", regex.captures_len(), captures_len);
            return Err(FormatError::CaptureMismatch {
                format: format!("{} formats", format_type),
                expected: captures_len - 1,
                found: regex.captures_len() - 1,
            });
        }
        defx!("{} alternatives, {} capture groups", alternatives.len(), captures_len);

        Ok(FormatSet {
            format_type,
            regex: Some(regex),
            alternatives,
            index,
        })
    }

    pub fn format_type(&self) -> FormatType {
        self.format_type
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn alternatives(&self) -> &[Alternative] {
        self.alternatives.as_slice()
    }

    /// The catalog regex pattern, if there are any formats.
    pub fn regex_str(&self) -> Option<&str> {
        self.regex
            .as_ref()
            .map(|regex| regex.as_str())
    }

    /// The compiled [`Format`] for `format`, if it is in this catalog.
    pub fn format(
        &self,
        format: &FormatStr,
    ) -> Option<&Format> {
        self.index
            .get(format)
            .map(|at| &self.alternatives[*at].format)
    }

    /// Match the entire `value` against the catalog.
    ///
    /// A match whose captured values cannot be resolved is
    /// [`ResultMatch::Err`]; later alternatives are not tried.
    pub fn match_str(
        &self,
        value: &str,
        century_threshold: Value,
    ) -> ResultMatch<Matched<'_>, ExtractError> {
        defn!("{} catalog, value {:?}", self.format_type, str_to_String_noraw(value));
        let regex: &Regex = match self.regex.as_ref() {
            Some(val) => val,
            None => {
                defx!("no formats, return NoMatch");
                return ResultMatch::NoMatch;
            }
        };
        let captures = match regex.captures(value) {
            Some(val) => val,
            None => {
                defx!("return NoMatch");
                return ResultMatch::NoMatch;
            }
        };
        // participation of the wrapper group, not a non-empty value, identifies
        // the alternative
        let alternative: &Alternative = match self
            .alternatives
            .iter()
            .find(|alt| captures.get(alt.wrapper_index).is_some())
        {
            Some(val) => val,
            None => {
                defx!("matched but no wrapper group participated, return NoMatch");
                return ResultMatch::NoMatch;
            }
        };
        debug_assert_lt!(
            alternative.wrapper_index + alternative.format.capture_count(),
            captures.len(),
            "capture offsets out of bounds for format {:?}",
            alternative.format.format()
        );
        let begin: usize = alternative.wrapper_index + 1;
        let end: usize = begin + alternative.format.capture_count();
        let values: Vec<Option<&str>> = (begin..end)
            .map(|at| captures.get(at).map(|m| m.as_str()))
            .collect();
        defo!("matched format {:?} values {:?}", alternative.format.format(), values);
        match alternative
            .format
            .process(values.as_slice(), century_threshold)
        {
            Ok(record) => {
                defx!("return Found({:?})", record);
                ResultMatch::Found(Matched {
                    record,
                    format: alternative.format.format(),
                })
            }
            Err(err) => {
                defx!("return Err({})", err);
                ResultMatch::Err(err)
            }
        }
    }

    /// Match the entire `value` against only `format` of this catalog.
    ///
    /// [`ResultMatch::NoMatch`] if `format` is not in this catalog.
    pub fn match_format(
        &self,
        format: &FormatStr,
        value: &str,
        century_threshold: Value,
    ) -> ResultMatch<Matched<'_>, ExtractError> {
        let format_: &Format = match self.format(format) {
            Some(val) => val,
            None => {
                defñ!("format {:?} not in {} catalog", format, self.format_type);
                return ResultMatch::NoMatch;
            }
        };
        match format_.match_str(value, century_threshold) {
            ResultMatch::Found(record) => ResultMatch::Found(Matched {
                record,
                format: format_.format(),
            }),
            ResultMatch::NoMatch => ResultMatch::NoMatch,
            ResultMatch::Err(err) => ResultMatch::Err(err),
        }
    }
}

impl fmt::Debug for FormatSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FormatSet")
            .field("format_type", &self.format_type)
            .field("alternatives", &self.alternatives)
            .finish()
    }
}
