// src/debug/mod.rs

//! The `debug` module is macros for printing warnings and errors, and helper
//! functions for debug builds and test builds.

pub mod printers;
