// src/data/mod.rs

//! The `data` module is the token table, the canonical record, and the
//! record to chrono datetime transform.
//!
//! ## Definitions of data
//!
//! ### Token
//!
//! A "token" is a short mnemonic, e.g. `yyyy` or `ampm`, standing for a fixed
//! regular expression fragment and an optional semantic field.
//! A token is represented by a [`Token`].
//!
//! ### Record
//!
//! A "record" is the ordered tuple
//! `(year, month, day, hour, min, sec, usec, offset)` extracted from a
//! matched string. Each slot is a value or unset.
//! A record is represented by a [`Record`].
//!
//! [`Token`]: crate::data::token::Token
//! [`Record`]: crate::data::record::Record

pub mod datetime;
pub mod record;
pub mod token;
