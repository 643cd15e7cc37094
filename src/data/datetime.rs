// src/data/datetime.rs

//! Transform a canonical [`Record`] into a chrono [`DateTime`].
//!
//! This is where calendar legality (e.g. day 30 of February) and time of day
//! range (hour `0` to `23`) are checked. Matching and extraction never check
//! either.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html

use crate::common::{Value, ValueOpt};
use crate::data::record::Record;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeZone,
};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A chrono [`DateTime`] type used in _dtfmtlib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Date used for records that carry only a time, e.g. from a `time` parse.
pub const DUMMY_DATE: (Value, Value, Value) = (2000, 1, 1);

fn to_u32(value: ValueOpt, default: u32) -> Option<u32> {
    match value {
        Some(val) => u32::try_from(val).ok(),
        None => Some(default),
    }
}

/// Build a [`DateTimeL`] from `record`.
///
/// - a record without date slots uses [`DUMMY_DATE`]
/// - unset time slots are zero
/// - the record `offset` is used if set, else `tz_offset`
///
/// Returns `None` if the record is not a legal calendar date and time of day.
pub fn record_to_datetime(
    record: &Record,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    defn!("({:?}, {:?})", record, tz_offset);
    let (year, month, day): (Value, ValueOpt, ValueOpt) = match record.has_date() {
        true => (record.year.unwrap_or(DUMMY_DATE.0), record.month, record.day),
        false => (DUMMY_DATE.0, Some(DUMMY_DATE.1), Some(DUMMY_DATE.2)),
    };
    let date: NaiveDate = match NaiveDate::from_ymd_opt(year, to_u32(month, 1)?, to_u32(day, 1)?) {
        Some(val) => val,
        None => {
            defx!("bad date {:?} {:?} {:?}, return None", year, month, day);
            return None;
        }
    };
    let time: NaiveTime = match NaiveTime::from_hms_micro_opt(
        to_u32(record.hour, 0)?,
        to_u32(record.min, 0)?,
        to_u32(record.sec, 0)?,
        to_u32(record.usec, 0)?,
    ) {
        Some(val) => val,
        None => {
            defx!("bad time {:?}, return None", record);
            return None;
        }
    };
    let offset: FixedOffset = match record.offset {
        Some(seconds) => FixedOffset::east_opt(seconds)?,
        None => *tz_offset,
    };
    let dt: DateTimeLOpt = offset
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .single();
    defx!("return {:?}", dt);

    dt
}
