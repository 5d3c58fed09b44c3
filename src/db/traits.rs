// Database trait — async interface over the analyses log.
//
// Implementor: SqliteDatabase (wraps rusqlite behind a tokio Mutex).
// All methods are async so a native-async backend could sit behind the
// same interface later without touching callers.
//
// The trait mirrors the queries.rs function signatures, so callers work
// against `Arc<dyn Database>` while unit tests can hit the free functions
// with a bare Connection.

use anyhow::Result;
use async_trait::async_trait;

use crate::moderation::{Action, ScoreVector};

use super::models::AnalysisRecord;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Analyses log ---

    /// Append one completed decision to the log. Returns the row id.
    async fn insert_analysis(
        &self,
        author: &str,
        content: &str,
        scores: &ScoreVector,
        action: Action,
    ) -> Result<i64>;

    /// Read the full log in insertion order (the aggregation input).
    async fn get_all_analyses(&self) -> Result<Vec<AnalysisRecord>>;

    /// Read the newest `limit` analyses, newest first.
    async fn get_recent_analyses(&self, limit: u32) -> Result<Vec<AnalysisRecord>>;

    /// Total number of stored analyses.
    async fn count_analyses(&self) -> Result<i64>;

    /// Timestamp of the newest stored analysis, if any.
    async fn last_analysis_at(&self) -> Result<Option<String>>;
}
