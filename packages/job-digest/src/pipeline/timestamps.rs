//! Posting-time parsing. Every function here fails soft to `None`.

use std::sync::OnceLock;

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;

/// Parse an RFC 3339 timestamp (`Z` or explicit offset) into UTC.
///
/// Naive timestamps carry no zone and are rejected rather than guessed.
pub fn parse_utc(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn from_unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Parse posting text from a scraped card: RFC 3339 first, then a relative
/// age measured back from `now`.
pub fn parse_posted(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    parse_utc(text).or_else(|| parse_relative(text, now))
}

fn relative_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:(?:re)?posted\s+)?(\d+|an?|one)\+?\s*(minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|wks?|w|months?|mo)(?:\s+ago)?$",
        )
        .expect("relative age pattern compiles")
    })
}

/// "3 hours ago", "30+ days ago", "2h", "an hour ago", "yesterday", "just now".
pub fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match text.as_str() {
        "" => return None,
        "just now" | "now" | "today" | "posted today" | "just posted" => return Some(now),
        "yesterday" | "posted yesterday" => return now.checked_sub_signed(TimeDelta::days(1)),
        _ => {}
    }

    let caps = relative_pattern().captures(&text)?;
    let amount: i64 = match &caps[1] {
        "a" | "an" | "one" => 1,
        digits => digits.parse().ok()?,
    };

    let unit = &caps[2];
    let age = if unit.starts_with("mo") {
        TimeDelta::try_days(amount.checked_mul(30)?)?
    } else if unit.starts_with('m') {
        TimeDelta::try_minutes(amount)?
    } else if unit.starts_with('h') {
        TimeDelta::try_hours(amount)?
    } else if unit.starts_with('d') {
        TimeDelta::try_days(amount)?
    } else {
        TimeDelta::try_weeks(amount)?
    };

    now.checked_sub_signed(age)
}
