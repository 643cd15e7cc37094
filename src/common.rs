// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common type aliases, error types, and result enums shared across
//! _dtfmtlib_.

use std::fmt;
use std::str::FromStr;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// format strings and format types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A caller-declared format string composed of tokens and literals,
/// e.g. `"yyyy-mm-dd hh:nn:ss"`.
///
/// The raw string is the format's unique key within its [`FormatType`] list.
pub type FormatString = String;
pub type FormatStr = str;
pub type FormatStrings = Vec<FormatString>;

/// Regular expression pattern, eventually passed to [`regex::Regex::new`].
///
/// [`regex::Regex::new`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html#method.new
pub type RegexPattern = str;

/// A value of a canonical record slot.
pub type Value = i32;
pub type ValueOpt = Option<Value>;

/// The three kinds of format lists (and compiled catalogs).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FormatType {
    Time,
    Date,
    Datetime,
}

/// All [`FormatType`]s, in the order their catalogs are stored.
pub const FORMAT_TYPES: [FormatType; 3] = [FormatType::Time, FormatType::Date, FormatType::Datetime];

impl FormatType {
    /// Index of this type within [`FORMAT_TYPES`].
    pub const fn index(&self) -> usize {
        match self {
            FormatType::Time => 0,
            FormatType::Date => 1,
            FormatType::Datetime => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FormatType::Time => "time",
            FormatType::Date => "date",
            FormatType::Datetime => "datetime",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" => Ok(FormatType::Time),
            "date" => Ok(FormatType::Date),
            "datetime" => Ok(FormatType::Datetime),
            _ => Err(format!("unknown format type {:?}; expected time, date, or datetime", s)),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Format-definition time failures.
///
/// Returned by format compilation and by every registry mutation. A failed
/// mutation leaves the registry unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormatError {
    /// The regex built from the format failed to compile.
    Compile {
        format: FormatString,
        regex: String,
        reason: String,
    },
    /// A semantic field (e.g. hour) appears more than once in one format.
    DuplicateField {
        format: FormatString,
        field: &'static str,
    },
    /// Literal text of the format introduced capturing groups, which would
    /// shift every following capture offset.
    CaptureMismatch {
        format: FormatString,
        expected: usize,
        found: usize,
    },
    /// `add` of a format already in the list.
    AlreadyExists {
        format_type: FormatType,
        format: FormatString,
    },
    /// `remove` of a format not in the list.
    NotFound {
        format_type: FormatType,
        format: FormatString,
    },
    /// `add` with a `before` format not in the list.
    AnchorNotFound {
        format_type: FormatType,
        format: FormatString,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Compile { format, regex, reason } => {
                write!(f, "The format {:?} failed to compile using regex {:?}: {}", format, regex, reason)
            }
            FormatError::DuplicateField { format, field } => {
                write!(f, "The format {:?} names field {} more than once", format, field)
            }
            FormatError::CaptureMismatch { format, expected, found } => {
                write!(
                    f,
                    "The format {:?} has {} capture groups, expected {}; literal text may not contain capture groups",
                    format, found, expected
                )
            }
            FormatError::AlreadyExists { format_type, format } => {
                write!(f, "Format {:?} is already included in {} formats", format, format_type)
            }
            FormatError::NotFound { format_type, format } => {
                write!(f, "Format {:?} not found in {} formats", format, format_type)
            }
            FormatError::AnchorNotFound { format_type, format } => {
                write!(f, "Format for before option {:?} was not found in {} formats", format, format_type)
            }
        }
    }
}

impl std::error::Error for FormatError {}

pub type ResultFormat<T> = std::result::Result<T, FormatError>;

/// Parse time failure of a matched format; a captured value could not be
/// resolved to a canonical record slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExtractError {
    NotANumber(String),
    UnknownMonth(String),
    BadOffset(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NotANumber(s) => write!(f, "not a number {:?}", s),
            ExtractError::UnknownMonth(s) => write!(f, "unknown month name {:?}", s),
            ExtractError::BadOffset(s) => write!(f, "bad timezone offset {:?}", s),
        }
    }
}

impl std::error::Error for ExtractError {}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for matching functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended
/// for format matching functions
#[derive(Clone, Debug, PartialEq)]
pub enum ResultMatch<T, E> {
    /// Contains the success data
    Found(T),
    /// Nothing matched, no bad errors happened
    NoMatch,
    /// Something matched but the matched data could not be processed
    Err(E),
}

impl<T, E> ResultMatch<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: ResultMatch::Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultMatch::Found(_))
    }

    /// Returns `true` if the result is [`NoMatch`].
    ///
    /// [`NoMatch`]: ResultMatch::NoMatch
    #[inline(always)]
    pub const fn is_no_match(&self) -> bool {
        matches!(*self, ResultMatch::NoMatch)
    }

    /// Returns `true` if the result is [`Err`].
    ///
    /// [`Err`]: ResultMatch::Err
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultMatch::Err(_))
    }

    /// Converts from `ResultMatch<T, E>` to [`Option<T>`], discarding the
    /// error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultMatch::Found(x) => Some(x),
            ResultMatch::NoMatch => None,
            ResultMatch::Err(_) => None,
        }
    }
}

impl<T, E> fmt::Display for ResultMatch<T, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultMatch::Found(_) => write!(f, "ResultMatch::Found"),
            ResultMatch::NoMatch => write!(f, "ResultMatch::NoMatch"),
            ResultMatch::Err(err) => write!(f, "ResultMatch::Err({})", err),
        }
    }
}
