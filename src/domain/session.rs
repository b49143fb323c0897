//! US equity regular-session clock.
//!
//! All session arithmetic happens in America/New_York local time, so DST
//! transitions move the UTC open between 13:30 and 14:30.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// Minutes in a regular 09:30-16:00 session.
pub const SESSION_MINUTES: f64 = 390.0;

pub fn market_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default()
}

pub fn market_close() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default()
}

pub fn early_session_end() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default()
}

fn to_eastern(ts: DateTime<Utc>) -> DateTime<Tz> {
    ts.with_timezone(&New_York)
}

/// Whole minutes since today's 09:30 ET open; 0 before the open.
pub fn session_elapsed_minutes(ts: DateTime<Utc>) -> i64 {
    let local = to_eastern(ts);
    let open_naive = local.date_naive().and_time(market_open());
    let open = match New_York.from_local_datetime(&open_naive).earliest() {
        Some(open) => open,
        None => return 0,
    };
    if local < open {
        return 0;
    }
    (local - open).num_minutes()
}

/// True on weekdays between 09:30 (inclusive) and 16:00 (exclusive) ET.
pub fn is_market_open(ts: DateTime<Utc>) -> bool {
    let local = to_eastern(ts);
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let t = local.time();
    market_open() <= t && t < market_close()
}

/// True between 09:30 (inclusive) and 11:00 (exclusive) ET.
pub fn is_early_session(ts: DateTime<Utc>) -> bool {
    let t = to_eastern(ts).time();
    market_open() <= t && t < early_session_end()
}
