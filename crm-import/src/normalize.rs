//! Field normalization for loosely formatted profile exports
//!
//! Every function here is total: unparseable input yields `None` (or a
//! zero/empty default), never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

// Letters include accented French month names ("février", "août")
static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\p{L}+) (\d{4})$").expect("valid regex"));

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Month names accepted in "<Month> <Year>" dates (case-sensitive)
const MONTHS: [(&str, u32); 24] = [
    ("January", 1),
    ("February", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("August", 8),
    ("September", 9),
    ("October", 10),
    ("November", 11),
    ("December", 12),
    ("janvier", 1),
    ("février", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("août", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("décembre", 12),
];

/// Formats tried, in order, once the year and month-year shapes have failed
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y.%m.%d",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

/// Normalize a free-text date to a calendar date
///
/// - `"2020"` → 2020-01-01
/// - `"March 2019"` / `"mars 2019"` → 2019-03-01 (unknown month names map to January)
/// - ISO and a handful of common layouts are parsed as-is
/// - anything else, including `""`, → `None`
pub fn normalize_date(input: Option<&str>) -> Option<NaiveDate> {
    let value = input?.trim();
    if value.is_empty() {
        return None;
    }

    if YEAR_ONLY.is_match(value) {
        let year: i32 = value.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    if let Some(caps) = MONTH_YEAR.captures(value) {
        let month = month_number(&caps[1]).unwrap_or(1);
        let year: i32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    parse_generic_date(value)
}

fn parse_generic_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    // "2019-03" style year-month
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

/// Whether an experience end date denotes a position still held
///
/// True when the end date is missing, blank, or mentions "present" or
/// "actuel" in any case. Other locales are not recognized.
pub fn is_current_position(date_to: Option<&str>) -> bool {
    match date_to {
        None => true,
        Some(value) if value.trim().is_empty() => true,
        Some(value) => {
            let lowered = value.to_lowercase();
            lowered.contains("present") || lowered.contains("actuel")
        }
    }
}

/// First integer found in a years-of-experience bucket ("10+" → 10, "3-5" → 3)
pub fn years_of_experience(bucket: Option<&str>) -> i64 {
    bucket
        .and_then(|value| FIRST_NUMBER.find(value))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parse a source audit timestamp into UTC
///
/// Accepts RFC 3339, naive `YYYY-MM-DD HH:MM:SS` (taken as UTC) and bare
/// dates (midnight UTC).
pub fn parse_timestamp(input: Option<&str>) -> Option<DateTime<Utc>> {
    let value = input?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
