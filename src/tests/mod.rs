// src/tests/mod.rs

//! Tests for _dtfmtlib_.
//!
//! Tests are placed at `src/tests/`, inside the `dtfmtlib`, for
//! crate-internal visibility. Tests of only the public API are at top-level
//! path `tests/`.

pub mod common_tests;
pub mod record_tests;
pub mod registry_tests;
