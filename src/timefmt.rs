// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Date handling for recorder timestamps and playlist labels.
//!
//! The recorder reports times as `dd-mm-yyyy h:mm:ss AM`; labels are shown as
//! `dd/mm/yyyy` plus a `h:mmAM-h:mmPM` span.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::Serialize;

static RECORDER_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{2})-(\d{2})-(\d{4}) (\d{1,2}):(\d{2}):(\d{2}) ?(AM|PM)$")
        .expect("static regex")
});

/// Date and time labels for one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeLabel {
    pub date: String,
    pub time: String,
}

/// Parse a recorder timestamp. Returns `None` when the text does not match
/// or names an impossible date.
pub fn parse_custom_date(s: &str) -> Option<NaiveDateTime> {
    let caps = RECORDER_TS.captures(s.trim())?;
    let num = |i: usize| caps[i].parse::<u32>().ok();

    let day = num(1)?;
    let month = num(2)?;
    let year = caps[3].parse::<i32>().ok()?;
    let mut hour = num(4)?;
    let minute = num(5)?;
    let second = num(6)?;

    let pm = caps[7].eq_ignore_ascii_case("PM");
    if pm && hour != 12 {
        hour += 12;
    }
    if !pm && hour == 12 {
        hour = 0;
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Build the playlist labels for a recording spanning `start`..`end`.
pub fn format_date_range(start: &str, end: &str) -> DateRangeLabel {
    match (parse_custom_date(start), parse_custom_date(end)) {
        (Some(s), Some(e)) => DateRangeLabel {
            date: s.format("%d/%m/%Y").to_string(),
            time: format!("{}-{}", short_time(&s), short_time(&e)),
        },
        _ => DateRangeLabel {
            date: "Invalid date".into(),
            time: "Invalid time".into(),
        },
    }
}

/// `h:mmAM` with an unpadded 12-hour clock.
fn short_time(dt: &NaiveDateTime) -> String {
    let (pm, hour) = dt.hour12();
    format!("{}:{:02}{}", hour, dt.minute(), if pm { "PM" } else { "AM" })
}

/// `dd/mm/yyyy hh:mm AM` for a local timestamp.
pub fn current_date_time(now: NaiveDateTime) -> String {
    now.format("%d/%m/%Y %I:%M %p").to_string()
}

/// SQL-style timestamp with seconds zeroed, as the recorder expects in
/// `start_time` / `end_time`.
pub fn format_to_sql(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:00").to_string()
}
