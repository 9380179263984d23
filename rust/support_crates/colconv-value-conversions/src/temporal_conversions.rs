use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use colconv_common::{Result, error::Error};

/// Days from 0001-01-01 (day 1 of the proleptic Gregorian calendar) to 1970-01-01.
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Length of a nominal day in milliseconds.
pub const MILLISECONDS_PER_DAY: i32 = 86_400_000;

/// Converts a signed day offset from 1970-01-01 to a calendar date.
#[inline]
pub fn unix_days_to_date(days: i32) -> Result<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| {
            Error::invalid_input("DATE", format!("day offset {days} is outside the calendar"))
        })
}

/// Converts a proleptic Gregorian ordinal (0001-01-01 is day 1) to a calendar date.
#[inline]
pub fn ordinal_to_date(ordinal: i32) -> Result<NaiveDate> {
    if ordinal < 1 {
        return Err(Error::invalid_input(
            "DATE",
            format!("ordinal {ordinal} precedes 0001-01-01"),
        ));
    }
    NaiveDate::from_num_days_from_ce_opt(ordinal).ok_or_else(|| {
        Error::invalid_input("DATE", format!("ordinal {ordinal} is outside the calendar"))
    })
}

/// Converts milliseconds since midnight to an elapsed duration.
///
/// Values outside `[0, MILLISECONDS_PER_DAY)` are kept as they are.
#[inline]
pub fn millis_to_time_of_day(millis: i32) -> TimeDelta {
    TimeDelta::milliseconds(millis as i64)
}

/// Converts microseconds since midnight to an elapsed duration, unclamped.
#[inline]
pub fn micros_to_time_of_day(micros: i64) -> TimeDelta {
    TimeDelta::microseconds(micros)
}

/// Converts signed milliseconds since 1970-01-01T00:00:00Z to a UTC timestamp,
/// keeping the millisecond remainder as sub-second precision.
#[inline]
pub fn unix_millis_to_timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        Error::invalid_input(
            "TIMESTAMP_MILLIS",
            format!("{millis} ms is outside the representable range"),
        )
    })
}

/// Converts signed microseconds since 1970-01-01T00:00:00Z to a UTC timestamp.
#[inline]
pub fn unix_micros_to_timestamp(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        Error::invalid_input(
            "TIMESTAMP_MICROS",
            format!("{micros} us is outside the representable range"),
        )
    })
}
