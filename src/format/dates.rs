//! Display dates and "days since" strings

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Format a timestamp in the local calendar, e.g. "Mon. 3 Jun 2024"
pub fn format_display_date(timestamp: DateTime<Utc>) -> String {
    format_display_date_in(&timestamp.with_timezone(&Local))
}

/// Format a timestamp using the calendar of its own time zone
pub fn format_display_date_in<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let weekday = WEEKDAYS[timestamp.weekday().num_days_from_sunday() as usize];
    let month = MONTHS[timestamp.month0() as usize];
    format!(
        "{}. {} {} {}",
        weekday,
        timestamp.day(),
        month,
        timestamp.year()
    )
}

/// Whole days between now and the timestamp
pub fn days_since(timestamp: DateTime<Utc>) -> String {
    days_since_from(timestamp, Utc::now())
}

/// Whole days between `now` and the timestamp, in either direction.
/// Zero days reads "today"; otherwise "1 day", "2 days", ...
pub fn days_since_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - timestamp).num_milliseconds().abs() / MILLIS_PER_DAY;
    match days {
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    }
}

/// Shorten text to `max` characters, marking the cut with "..."
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}
