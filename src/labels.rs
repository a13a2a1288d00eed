//! Human-readable labels shown on board cards

use chrono::NaiveDateTime;

/// Label for a card without any activity
pub const NO_ACTIVITY: &str = "No activity";

/// Label for activity less than a minute ago
pub const JUST_NOW: &str = "Just now";

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Time since the last activity, relative to `now`
///
/// Buckets, all floored:
/// - under a minute (or in the future): `Just now`
/// - under an hour: `{m}m ago`
/// - under a day: `{h}h ago` or `{h}h {m}m ago`
/// - under 30 days: `{d}d ago`
/// - under a year: `{months}mo ago`
/// - otherwise: `{years}y ago`
pub fn time_ago(now: NaiveDateTime, last_activity_at: Option<NaiveDateTime>) -> String {
    let Some(last_activity_at) = last_activity_at else {
        return NO_ACTIVITY.to_string();
    };

    let minutes = (now - last_activity_at).num_minutes();

    if minutes < 1 {
        return JUST_NOW.to_string();
    }

    if minutes < MINUTES_PER_HOUR {
        return format!("{minutes}m ago");
    }

    let hours = minutes / MINUTES_PER_HOUR;
    if hours < HOURS_PER_DAY {
        let minutes = minutes % MINUTES_PER_HOUR;

        return if minutes == 0 {
            format!("{hours}h ago")
        } else {
            format!("{hours}h {minutes}m ago")
        };
    }

    let days = hours / HOURS_PER_DAY;
    if days < DAYS_PER_MONTH {
        format!("{days}d ago")
    } else if days < DAYS_PER_YEAR {
        format!("{}mo ago", days / DAYS_PER_MONTH)
    } else {
        format!("{}y ago", days / DAYS_PER_YEAR)
    }
}

/// Number of notes with the right plural: `0 notes`, `1 note`, `2 notes`
pub fn notes_count_label(notes_count: usize) -> String {
    if notes_count == 1 {
        "1 note".to_string()
    } else {
        format!("{notes_count} notes")
    }
}

/// Visibility badge of a board
pub fn visibility_label(is_public: bool) -> &'static str {
    if is_public { "Public" } else { "Private" }
}
