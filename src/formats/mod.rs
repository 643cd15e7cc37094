// src/formats/mod.rs

//! The `formats` module compiles format strings, combines them into
//! per-type catalogs, and parses candidate strings against those catalogs.
//!
//! ## Overview
//!
//! 1. A format string, e.g. `"yyyy-mm-dd hh:nn:ss"`, is compiled by
//!    [`Format::compile`] into a regex fragment with one capture group per
//!    semantic token, plus an extractor.
//! 2. All formats of one [`FormatType`] are combined by
//!    [`FormatSet::compile`] into one alternation regex, a "catalog".
//! 3. [`parse_sets`] tries one or two catalogs, depending upon the requested
//!    type and the value length, and returns the extracted [`Record`].
//! 4. A [`FormatRegistry`] owns the ordered format lists and their catalogs,
//!    and rebuilds catalogs when the lists change.
//!
//! [`Format::compile`]: crate::formats::format::Format::compile
//! [`FormatType`]: crate::common::FormatType
//! [`FormatSet::compile`]: crate::formats::formatset::FormatSet::compile
//! [`parse_sets`]: crate::formats::parser::parse_sets
//! [`Record`]: crate::data::record::Record
//! [`FormatRegistry`]: crate::formats::registry::FormatRegistry

pub mod definitions;
pub mod format;
pub mod formatset;
pub mod parser;
pub mod registry;
