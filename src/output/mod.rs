// Output formatting — terminal display helpers.

pub mod terminal;

use chrono::{NaiveDateTime, Utc};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a stored timestamp ("YYYY-MM-DD HH:MM:SS", UTC — SQLite's
/// datetime('now') format) as a relative age like "5 min ago".
/// Timestamps that don't parse are shown as-is.
pub fn relative_time(created_at: &str) -> String {
    let Ok(parsed) = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S") else {
        return created_at.to_string();
    };

    let seconds = (Utc::now().naive_utc() - parsed).num_seconds();
    if seconds < 0 {
        return created_at.to_string();
    }
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{} min ago", seconds / 60),
        3600..=86399 => format!("{} h ago", seconds / 3600),
        _ => format!("{} d ago", seconds / 86400),
    }
}
