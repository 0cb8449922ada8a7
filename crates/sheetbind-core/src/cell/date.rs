//! Excel serial date conversion
//!
//! Spreadsheets store dates as serial numbers (days since a base date, with the
//! time of day as the fractional part). In the 1900 date system serial 1 is
//! 1900-01-01 and serial 60 is the non-existent 1900-02-29 kept for Lotus
//! compatibility; dates from 1900-03-01 on are therefore offset by one day.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Largest serial representable (9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

fn epoch(days: i64) -> Option<NaiveDateTime> {
    // 1899-12-30 for serials after the phantom leap day, 1899-12-31 before it
    let day = if days >= 61 { 30 } else { 31 };
    NaiveDate::from_ymd_opt(1899, 12, day)?.and_hms_opt(0, 0, 0)
}

/// Convert a 1900-system serial number into a date and time
///
/// Returns `None` for negative, non-finite or out-of-range serials and for
/// serial 60, which names a day that does not exist.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL + 1.0 {
        return None;
    }

    let days = serial.trunc() as i64;
    if days == 60 {
        return None;
    }

    let seconds = (serial.fract() * SECONDS_PER_DAY).round() as i64;
    epoch(days)?
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Convert a date and time into a 1900-system serial number
pub fn datetime_to_serial(dt: NaiveDateTime) -> f64 {
    let Some(base) = epoch(61) else {
        return f64::NAN;
    };
    let days = (dt - base).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0);
    if days < 61.0 {
        days - 1.0
    } else {
        days
    }
}
