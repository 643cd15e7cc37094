// src/bin/dtfmt.rs

//! Driver program _dtfmt_ drives the [_dtfmtlib_].
//!
//! Processes user-passed command-line arguments, applies any requested
//! changes to the process-wide format registry, then parses each passed
//! value (or each line of STDIN if passed `-`) and prints one result line
//! per value.
//!
//! A result line is tab-separated: the value, the catalog type that
//! matched, the format that matched, and the record slots. Unset slots print
//! as `-`. With `--timestamp` the record is also printed as an RFC 3339
//! datetime. A value that does not parse prints `None`.
//!
//! The exit code is non-zero if any value did not parse.
//!
//! [_dtfmtlib_]: dtfmtlib

#![allow(non_camel_case_types)]

use std::io::BufRead; // for `StdinLock::lines`
use std::process::ExitCode;

use ::anyhow::{Context, Result};
use ::chrono::FixedOffset;
use ::clap::Parser;
use ::const_format::concatcp;
use ::dtfmtlib::common::{FormatStrings, FormatType, Value, FORMAT_TYPES};
use ::dtfmtlib::data::datetime::{record_to_datetime, DateTimeLOpt};
use ::dtfmtlib::data::record::{offset_in_seconds, AMBIGUOUS_YEAR_THRESHOLD_DEFAULT};
use ::dtfmtlib::debug::printers::{e_err, e_wrn};
use ::dtfmtlib::formats::parser::{ParseOptions, Parsed};
use ::dtfmtlib::formats::registry::{
    add_formats,
    formats,
    remove_us_formats,
    FORMAT_REGISTRY,
};
use ::si_trace_print::stack::stack_offset_set;
use ::si_trace_print::{defn, defo, defx};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
Format tokens:
    yyyy yy mmm mm m dd d hh h nn n ss s u ampm zo
    ddd (day name, ignored) tz (timezone name, ignored) _ (optional space)
Other characters of a format are literal.

Two digit years less than CENTURY_THRESHOLD are 20xx, otherwise 19xx.
A datetime VALUE shorter than 11 characters is tried as a date first.

Example formats:
    \"yyyy-mm-dd hh:nn:ss\"
    \"d mmm yy\"
    \"h:nn_ampm\"
    \"yyyy-mm-ddThh:nn:ss.uzo\"",
    CLI_HELP_AFTER_NOTE_DEBUG,
);

/// Default `--tz-offset`.
const CLI_TZ_OFFSET_DEFAULT: &str = "+00:00";

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "dtfmt",
    // write expanded information for the `--version` output
    version = concatcp!(
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Value(s) to parse.
    /// Values may also be passed via STDIN, one per line. The user must
    /// supply argument "-" to signify VALUES are available from STDIN.
    #[clap(
        required_unless_present = "list",
        verbatim_doc_comment,
    )]
    values: Vec<String>,

    /// Parse values as this type: "time", "date", or "datetime".
    /// Default is "datetime".
    #[clap(
        short = 'T',
        long = "type",
        verbatim_doc_comment,
        value_parser = cli_parse_format_type,
    )]
    format_type: Option<FormatType>,

    /// Match only this format of the requested type.
    #[clap(
        short = 'f',
        long,
        verbatim_doc_comment,
    )]
    format: Option<String>,

    /// Keep the timezone offset of formats that have a "zo" token.
    #[clap(
        short = 'o',
        long,
        verbatim_doc_comment,
    )]
    include_offset: bool,

    /// Two digit years less than this are 20xx, otherwise 19xx.
    #[clap(
        short = 'c',
        long,
        verbatim_doc_comment,
        default_value_t = AMBIGUOUS_YEAR_THRESHOLD_DEFAULT,
    )]
    century_threshold: Value,

    /// Add a format to the requested type, before any --before format.
    /// May be passed more than once; formats are added in passed order.
    #[clap(
        short = 'a',
        long,
        verbatim_doc_comment,
    )]
    add_format: Vec<String>,

    /// Insert --add-format formats before this existing format.
    #[clap(
        short = 'b',
        long,
        verbatim_doc_comment,
        requires = "add_format",
    )]
    before: Option<String>,

    /// Remove month-before-day formats, e.g. "m/d/yy", from the date and
    /// datetime formats, so day-before-month formats take precedence.
    #[clap(
        short = 'u',
        long,
        verbatim_doc_comment,
    )]
    remove_us_formats: bool,

    /// Print the formats of the requested type, in precedence order, then
    /// exit. With --type not passed, print formats of all types.
    #[clap(
        short = 'l',
        long,
        verbatim_doc_comment,
    )]
    list: bool,

    /// Also print each parsed record as an RFC 3339 datetime.
    /// Records without a date use date 2000-01-01.
    #[clap(
        short = 's',
        long,
        verbatim_doc_comment,
    )]
    timestamp: bool,

    /// Timezone offset for --timestamp of records without an offset.
    /// Example values, "+12:00", "-0800", or "Z".
    /// To pass a value with leading "-" use "=" notation, e.g. "-t=-0800".
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_tz_offset,
        default_value = CLI_TZ_OFFSET_DEFAULT,
    )]
    tz_offset: FixedOffset,
}

impl CLI_Args {
    /// The requested `--type`.
    fn format_type(&self) -> FormatType {
        self.format_type.unwrap_or(FormatType::Datetime)
    }
}

/// `clap` argument parser for `--type`.
fn cli_parse_format_type(format_type: &str) -> std::result::Result<FormatType, String> {
    format_type.parse::<FormatType>()
}

/// `clap` argument parser for `--tz-offset`.
fn cli_process_tz_offset(tzo: &str) -> std::result::Result<FixedOffset, String> {
    defn!("({:?})", tzo);
    let seconds: Value = match tzo {
        "Z" | "z" | "UTC" | "GMT" => 0,
        _ => match offset_in_seconds(tzo) {
            Ok(val) => val,
            Err(err) => {
                defx!("offset_in_seconds error {}", err);
                return Err(format!("Unable to parse a timezone offset for --tz-offset {:?}: {}", tzo, err));
            }
        },
    };
    match FixedOffset::east_opt(seconds) {
        Some(val) => {
            defx!("return {:?}", val);
            Ok(val)
        }
        None => Err(format!("Timezone offset out of range for --tz-offset {:?}", tzo)),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// processing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Apply the requested registry changes to the process-wide registry.
fn registry_setup(args: &CLI_Args) -> Result<()> {
    defn!();
    if args.remove_us_formats {
        remove_us_formats().context("--remove-us-formats failed")?;
    }
    if !args.add_format.is_empty() {
        add_formats(args.format_type(), &args.add_format, args.before.as_deref())
            .with_context(|| format!("--add-format failed for {} formats", args.format_type()))?;
    }
    defx!("registry version {}", FORMAT_REGISTRY.version());

    Ok(())
}

/// Print the formats of `format_types`, one per line, prefixed by type.
fn print_formats(format_types: &[FormatType]) {
    for format_type in format_types.iter() {
        let formats_: FormatStrings = formats(*format_type);
        for format in formats_.iter() {
            println!("{}\t{}", format_type, format);
        }
    }
}

/// Parse `value`, print the result line. Returns `true` if `value` parsed.
fn process_value(
    value: &str,
    args: &CLI_Args,
    options: &ParseOptions,
) -> bool {
    defn!("({:?})", value);
    let parsed: Parsed = match FORMAT_REGISTRY.parse_matched(value, args.format_type(), options) {
        Some(val) => val,
        None => {
            println!("{}\tNone", value);
            defx!("no parse");
            return false;
        }
    };
    if !args.timestamp {
        println!("{}\t{}\t{}\t{}", value, parsed.format_type, parsed.format, parsed.record);
        defx!();
        return true;
    }
    let dt: DateTimeLOpt = record_to_datetime(&parsed.record, &args.tz_offset);
    match dt {
        Some(dt_) => {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                value,
                parsed.format_type,
                parsed.format,
                parsed.record,
                dt_.to_rfc3339()
            );
        }
        None => {
            e_wrn!("record {} of value {:?} is not a valid datetime", parsed.record, value);
            println!("{}\t{}\t{}\t{}\tNone", value, parsed.format_type, parsed.format, parsed.record);
        }
    }
    defx!();

    true
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    if let Err(err) = registry_setup(&args) {
        e_err!("{:#}", err);
        defx!("registry_setup failed");
        return ExitCode::FAILURE;
    }

    if args.list {
        match args.format_type {
            Some(format_type) => print_formats(&[format_type]),
            None => print_formats(&FORMAT_TYPES),
        }
        defx!("list");
        return ExitCode::SUCCESS;
    }

    let options = ParseOptions {
        include_offset: args.include_offset,
        century_threshold: args.century_threshold,
        format: args.format.clone(),
        ..Default::default()
    };

    let mut all_parsed: bool = true;
    for value in args.values.iter() {
        if value != "-" {
            all_parsed &= process_value(value, &args, &options);
            continue;
        }
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line: String = match line {
                Ok(val) => val,
                Err(err) => {
                    e_err!("reading STDIN: {}", err);
                    defx!("STDIN error");
                    return ExitCode::FAILURE;
                }
            };
            all_parsed &= process_value(line.as_str(), &args, &options);
        }
    }
    defx!("all_parsed {}", all_parsed);

    match all_parsed {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use ::test_case::test_case;

    use super::*;

    #[test_case("+00:00", 0; "+00:00 east(0)")]
    #[test_case("+0000", 0; "+0000 east(0)")]
    #[test_case("+00:01", 60; "+00:01 east(60)")]
    #[test_case("-01:00", -3600; "-01:00 east(-3600)")]
    #[test_case("+02:30", 9000; "+02:30 east(9000)")]
    #[test_case("+1000", 36000; "+1000 east(36000)")]
    #[test_case("Z", 0; "Z (0)")]
    #[test_case("UTC", 0; "UTC (0)")]
    fn test_cli_process_tz_offset(
        in_: &str,
        seconds: i32,
    ) {
        let result = cli_process_tz_offset(in_);
        match result {
            Ok(fo) => assert_eq!(fo.local_minus_utc(), seconds, "for {:?}", in_),
            Err(err) => panic!("cli_process_tz_offset({:?}) returned error {}", in_, err),
        }
    }

    #[test_case(""; "empty")]
    #[test_case("+1"; "too short")]
    #[test_case("EDT"; "named")]
    #[test_case("0100"; "no sign")]
    fn test_cli_process_tz_offset_err(in_: &str) {
        assert!(cli_process_tz_offset(in_).is_err(), "expected error for {:?}", in_);
    }

    #[test_case("time", FormatType::Time)]
    #[test_case("DATE", FormatType::Date)]
    #[test_case("datetime", FormatType::Datetime)]
    fn test_cli_parse_format_type(
        in_: &str,
        expect: FormatType,
    ) {
        assert_eq!(cli_parse_format_type(in_), Ok(expect));
    }

    #[test]
    fn test_cli_parse_format_type_err() {
        assert!(cli_parse_format_type("timestamp").is_err());
    }

    #[test]
    fn test_cli_args_defaults() {
        let args = CLI_Args::parse_from(["dtfmt", "2000-01-02"]);
        assert_eq!(args.format_type(), FormatType::Datetime);
        assert_eq!(args.century_threshold, AMBIGUOUS_YEAR_THRESHOLD_DEFAULT);
        assert_eq!(args.tz_offset.local_minus_utc(), 0);
        assert!(!args.list);
        assert_eq!(args.values, vec![String::from("2000-01-02")]);
    }

    #[test]
    fn test_cli_args_list_without_values() {
        let args = CLI_Args::try_parse_from(["dtfmt", "--list", "--type", "time"]).unwrap();
        assert!(args.list);
        assert_eq!(args.format_type, Some(FormatType::Time));
    }

    #[test]
    fn test_cli_args_before_requires_add_format() {
        assert!(CLI_Args::try_parse_from(["dtfmt", "--before", "d/m/yy", "1/2/00"]).is_err());
    }
}
