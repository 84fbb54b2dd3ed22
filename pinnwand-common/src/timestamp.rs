//! Relative display timestamps ("Just now", "2h ago").

use time::{Duration, UtcDateTime};

/// Formats the distance between `created_at` and `now` the way the feed
/// displays it. Times in the future collapse to "Just now".
#[must_use]
pub fn relative(created_at: UtcDateTime, now: UtcDateTime) -> String {
    let elapsed = now - created_at;
    if elapsed < Duration::minutes(1) {
        "Just now".to_owned()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.whole_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.whole_hours())
    } else {
        format!("{}d ago", elapsed.whole_days())
    }
}
