// src/lib.rs

//! Parse loosely formatted date, time, and datetime strings using ordered
//! lists of mnemonic format strings such as `"d mmm yy"` or
//! `"yyyy-mm-ddThh:nn:sszo"`.
//!
//! A successful parse yields a [`Record`], the tuple
//! `(year, month, day, hour, min, sec, usec, offset)` with unset slots for
//! fields the matched format did not have.
//!
//! The process-wide registry is used through the free functions of
//! [`formats::registry`]; a private [`FormatRegistry`] may be created for
//! isolated use.
//!
//! [`Record`]: crate::data::record::Record
//! [`FormatRegistry`]: crate::formats::registry::FormatRegistry

pub mod common;
pub mod data;
pub mod debug;
pub mod formats;
#[cfg(test)]
pub mod tests;
