// src/data/token.rs

//! The token table and the tokenizer.
//!
//! A format string like `"d mmm yy"` is decomposed, left to right, into
//! [`Segment`]s; each segment is either literal text or one [`Token`].
//! Tokens are substituted one spelling at a time, longest spelling first, so
//! `yyyy` is consumed before `yy` and `ampm` before `m`. Text already consumed
//! by a token is never re-scanned for a shorter token.
//!
//! The token table:
//!
//! | token  | regex fragment             | field    |
//! |--------|----------------------------|----------|
//! | `ddd`  | `[[:alpha:]]{3,9}`         |          |
//! | `dd`   | `[0-9]{2}`                 | day      |
//! | `d`    | `[0-9]{1,2}`               | day      |
//! | `mmm`  | `[[:alpha:]]{3,9}`         | month    |
//! | `mm`   | `[0-9]{2}`                 | month    |
//! | `m`    | `[0-9]{1,2}`               | month    |
//! | `yyyy` | `[0-9]{4}`                 | year     |
//! | `yy`   | `[0-9]{4}\|[0-9]{2}`       | year     |
//! | `hh`   | `[0-9]{2}`                 | hour     |
//! | `h`    | `[0-9]{1,2}`               | hour     |
//! | `nn`   | `[0-9]{2}`                 | minute   |
//! | `n`    | `[0-9]{1,2}`               | minute   |
//! | `ss`   | `[0-9]{2}`                 | second   |
//! | `s`    | `[0-9]{1,2}`               | second   |
//! | `u`    | `[0-9]{1,6}`               | usec     |
//! | `ampm` | `[aApP]\.?[mM]\.?`         | meridian |
//! | `zo`   | `[+-][0-9]{2}:?[0-9]{2}`   | offset   |
//! | `tz`   | `[A-Z]{1,5}`               |          |
//! | `_`    | `\s?`                      |          |
//!
//! Digits are matched with `[0-9]`, not `\d`, because the `regex` crate's
//! `\d` is Unicode-aware and captured values must parse as ASCII integers.

#![allow(non_upper_case_globals)]

use crate::common::{FormatStr, RegexPattern};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// semantic fields
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The canonical record slot a token's captured value feeds.
///
/// `Meridian` feeds no slot directly; it adjusts `Hour`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Min,
    Sec,
    Usec,
    Meridian,
    Offset,
}

impl Field {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Min => "min",
            Field::Sec => "sec",
            Field::Usec => "usec",
            Field::Meridian => "meridian",
            Field::Offset => "offset",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// token table
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Day name, e.g. `"Mon"` or `"Monday"`. Matched, never captured.
pub const RP_DAYNAME: &RegexPattern = "[[:alpha:]]{3,9}";
/// Month name, e.g. `"Jan"` or `"January"`.
pub const RP_MONTHNAME: &RegexPattern = "[[:alpha:]]{3,9}";
pub const RP_D2: &RegexPattern = "[0-9]{2}";
pub const RP_D12: &RegexPattern = "[0-9]{1,2}";
pub const RP_D4: &RegexPattern = "[0-9]{4}";
/// Year of four or two digits; two digit years are resolved with the
/// ambiguous year threshold.
pub const RP_YEAR42: &RegexPattern = "[0-9]{4}|[0-9]{2}";
pub const RP_USEC: &RegexPattern = "[0-9]{1,6}";
pub const RP_MERIDIAN: &RegexPattern = r"[aApP]\.?[mM]\.?";
pub const RP_OFFSET: &RegexPattern = "[+-][0-9]{2}:?[0-9]{2}";
/// Timezone abbreviation, e.g. `"PST"`. Matched, never captured.
pub const RP_TZ: &RegexPattern = "[A-Z]{1,5}";
/// Optional space.
pub const RP_SPACEq: &RegexPattern = r"\s?";

/// A short mnemonic standing for a fixed regex fragment and an optional
/// semantic field.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub spelling: &'static str,
    pub pattern: &'static RegexPattern,
    pub field: Option<Field>,
}

impl Token {
    /// Does this token feed a capture group?
    pub const fn is_semantic(&self) -> bool {
        self.field.is_some()
    }
}

/// Declare a [`Token`] more easily.
macro_rules! TOKEN {
    ($spelling:literal, $pattern:expr, $field:expr) => {
        Token {
            spelling: $spelling,
            pattern: $pattern,
            field: $field,
        }
    };
}

pub const TOKENS_LEN: usize = 19;

/// Every known token. Declaration order is the tie-break among spellings of
/// equal length; see [`TOKENS_LONGEST_FIRST`].
pub static TOKENS: [Token; TOKENS_LEN] = [
    TOKEN!("ddd", RP_DAYNAME, None),
    TOKEN!("dd", RP_D2, Some(Field::Day)),
    TOKEN!("d", RP_D12, Some(Field::Day)),
    TOKEN!("mmm", RP_MONTHNAME, Some(Field::Month)),
    TOKEN!("mm", RP_D2, Some(Field::Month)),
    TOKEN!("m", RP_D12, Some(Field::Month)),
    TOKEN!("yyyy", RP_D4, Some(Field::Year)),
    TOKEN!("yy", RP_YEAR42, Some(Field::Year)),
    TOKEN!("hh", RP_D2, Some(Field::Hour)),
    TOKEN!("h", RP_D12, Some(Field::Hour)),
    TOKEN!("nn", RP_D2, Some(Field::Min)),
    TOKEN!("n", RP_D12, Some(Field::Min)),
    TOKEN!("ss", RP_D2, Some(Field::Sec)),
    TOKEN!("s", RP_D12, Some(Field::Sec)),
    TOKEN!("u", RP_USEC, Some(Field::Usec)),
    TOKEN!("ampm", RP_MERIDIAN, Some(Field::Meridian)),
    TOKEN!("zo", RP_OFFSET, Some(Field::Offset)),
    TOKEN!("tz", RP_TZ, None),
    TOKEN!("_", RP_SPACEq, None),
];

lazy_static! {
    /// [`TOKENS`] ordered by spelling length, longest first.
    /// The sort is stable so equal lengths keep declaration order.
    pub static ref TOKENS_LONGEST_FIRST: Vec<&'static Token> = {
        let mut tokens: Vec<&'static Token> = TOKENS.iter().collect();
        tokens.sort_by(|a, b| b.spelling.len().cmp(&a.spelling.len()));
        tokens
    };
}

/// Find the [`Token`] with `spelling`.
pub fn token_lookup(spelling: &str) -> Option<&'static Token> {
    TOKENS
        .iter()
        .find(|token| token.spelling == spelling)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// tokenizer
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One piece of a decomposed format string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Literal text, not yet regex-escaped.
    Literal(String),
    Token(&'static Token),
}

impl Segment {
    /// The regex fragment of this segment. Semantic tokens are wrapped in a
    /// capturing group, other tokens are inserted bare, literal text has `.`
    /// and `\` escaped.
    pub fn to_regex_fragment(&self) -> String {
        match self {
            Segment::Literal(literal) => escape_literal(literal),
            Segment::Token(token) if token.is_semantic() => format!("({})", token.pattern),
            Segment::Token(token) => token.pattern.to_string(),
        }
    }

    /// The semantic field of this segment, if any.
    pub const fn field(&self) -> Option<Field> {
        match self {
            Segment::Literal(_) => None,
            Segment::Token(token) => token.field,
        }
    }
}

/// Escape the two regex-special literal characters `.` and `\`.
///
/// Other literal characters are passed to the regex verbatim.
pub fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len() + 4);
    for c in literal.chars() {
        if matches!(c, '.' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Split every occurrence of `token` out of `literal`, appending the pieces
/// to `segments`.
fn split_literal(
    literal: String,
    token: &'static Token,
    segments: &mut Vec<Segment>,
) {
    if !literal.contains(token.spelling) {
        segments.push(Segment::Literal(literal));
        return;
    }
    let mut rest: &str = literal.as_str();
    while let Some(at) = rest.find(token.spelling) {
        if at > 0 {
            segments.push(Segment::Literal(rest[..at].to_string()));
        }
        segments.push(Segment::Token(token));
        rest = &rest[at + token.spelling.len()..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
}

/// Decompose `format` into an ordered list of [`Segment`]s.
///
/// For each token, longest spelling first, every non-overlapping occurrence
/// within the remaining literal text is replaced by that token. Resulting
/// segments are in left-to-right positional order of `format`.
pub fn tokenize(format: &FormatStr) -> Vec<Segment> {
    defn!("({:?})", str_to_String_noraw(format));
    let mut segments: Vec<Segment> = vec![Segment::Literal(format.to_string())];
    if format.is_empty() {
        segments.clear();
        defx!("empty format, return {:?}", segments);
        return segments;
    }
    for token in TOKENS_LONGEST_FIRST.iter() {
        let mut next: Vec<Segment> = Vec::with_capacity(segments.len() + 2);
        for segment in segments.into_iter() {
            match segment {
                Segment::Literal(literal) => split_literal(literal, token, &mut next),
                Segment::Token(_) => next.push(segment),
            }
        }
        segments = next;
    }
    defx!("return {} segments {:?}", segments.len(), segments);

    segments
}
