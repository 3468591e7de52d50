use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Human wording for how long ago a round was last written.
#[must_use]
pub fn format_time_ago_for_round_view(td: ChronoDuration) -> String {
    let secs = td.num_seconds();

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;

    if secs < 10 {
        "just now".to_string()
    } else if secs < MINUTE {
        format!("{secs} seconds ago")
    } else if secs < HOUR {
        let minutes = secs / MINUTE;
        if minutes == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{minutes} minutes ago")
        }
    } else if secs < DAY {
        let hours = secs / HOUR;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        }
    } else if secs < WEEK {
        let days = secs / DAY;
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{days} days ago")
        }
    } else {
        let weeks = secs / WEEK;
        if weeks == 1 {
            "1 week ago".to_string()
        } else {
            format!("{weeks} weeks ago")
        }
    }
}

/// Render an epoch-millis round date like "Mar 08, 2025". Out-of-range
/// values fall back to the raw number rather than panicking.
#[must_use]
pub fn format_round_date(epoch_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_millis) {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => epoch_millis.to_string(),
    }
}

/// Today's date as epoch millis, the default for new rounds.
#[must_use]
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
