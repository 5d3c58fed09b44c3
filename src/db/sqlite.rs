// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs remain the single source of SQL so
// tests can exercise them against a Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::config::CategorySet;
use crate::moderation::{Action, ScoreVector};

use super::models::AnalysisRecord;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
    /// Stored rows are validated against this set on every read.
    categories: CategorySet,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection, categories: CategorySet) -> Self {
        Self {
            conn: Mutex::new(conn),
            categories,
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_analysis(
        &self,
        author: &str,
        content: &str,
        scores: &ScoreVector,
        action: Action,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_analysis(&conn, author, content, scores, action)
    }

    async fn get_all_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_all_analyses(&conn, &self.categories)
    }

    async fn get_recent_analyses(&self, limit: u32) -> Result<Vec<AnalysisRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_analyses(&conn, &self.categories, limit)
    }

    async fn count_analyses(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_analyses(&conn)
    }

    async fn last_analysis_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_analysis_at(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::moderation::RawScores;

    fn categories() -> CategorySet {
        CategorySet::new(["toxic", "insult"]).unwrap()
    }

    fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn, categories())
    }

    fn vector(toxic: f64) -> ScoreVector {
        let raw: RawScores = [("toxic".to_string(), toxic), ("insult".to_string(), 0.0)]
            .into_iter()
            .collect();
        ScoreVector::validate(&categories(), &raw).unwrap()
    }

    #[tokio::test]
    async fn trait_round_trip() {
        let db = test_db();
        let id = db
            .insert_analysis("Alice", "text", &vector(0.9), Action::Flag)
            .await
            .unwrap();
        assert!(id > 0);

        assert_eq!(db.count_analyses().await.unwrap(), 1);
        let records = db.get_all_analyses().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, Action::Flag);
    }

    #[tokio::test]
    async fn recent_limit_applies() {
        let db = test_db();
        for _ in 0..4 {
            db.insert_analysis("A", "text", &vector(0.1), Action::Allow)
                .await
                .unwrap();
        }
        let recent = db.get_recent_analyses(2).await.unwrap();
        assert_eq!(recent.len(), 2);
    }
}
