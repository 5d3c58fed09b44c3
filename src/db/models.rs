// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use crate::moderation::{Action, ScoreVector};

/// The sentinel author used when no display name is supplied.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous User";

/// One completed moderation decision, as stored in the analyses log.
///
/// Immutable after creation: records are appended once and never updated
/// or deleted by this engine. The analytics aggregator only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    pub id: i64,
    /// Display name of the content author (never empty; see resolve_author).
    pub author: String,
    /// The analyzed text.
    pub content: String,
    /// Validated per-category probabilities.
    pub scores: ScoreVector,
    /// The policy's decision at the time of creation.
    pub action: Action,
    /// Insertion timestamp assigned by the store (UTC, "YYYY-MM-DD HH:MM:SS").
    pub created_at: String,
}

/// Resolve an optional author name to a non-empty display name.
/// Blank or whitespace-only input falls back to the anonymous sentinel.
pub fn resolve_author(author: Option<&str>) -> String {
    match author {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => ANONYMOUS_AUTHOR.to_string(),
    }
}
