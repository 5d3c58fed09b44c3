// Database queries — CRUD operations for the analyses log.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces. Stored rows are re-validated against the configured
// category set on read: a row whose scores or action no longer fit the
// configuration fails loudly instead of skewing analytics.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::CategorySet;
use crate::moderation::{Action, RawScores, ScoreVector};

use super::models::AnalysisRecord;

const RECORD_COLUMNS: &str = "id, author, content, scores, action, created_at";

/// Append one analysis to the log. Returns the new row id.
/// The insertion timestamp comes from SQLite, so it is non-decreasing
/// in insertion order.
pub fn insert_analysis(
    conn: &Connection,
    author: &str,
    content: &str,
    scores: &ScoreVector,
    action: Action,
) -> Result<i64> {
    let scores_json = scores.to_json()?;
    conn.execute(
        "INSERT INTO analyses (author, content, scores, action, created_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))",
        params![author, content, scores_json, action.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Read the full log in insertion order.
pub fn get_all_analyses(
    conn: &Connection,
    categories: &CategorySet,
) -> Result<Vec<AnalysisRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM analyses ORDER BY id ASC");
    collect_records(conn, categories, &sql, None)
}

/// Read the newest `limit` analyses, newest first.
pub fn get_recent_analyses(
    conn: &Connection,
    categories: &CategorySet,
    limit: u32,
) -> Result<Vec<AnalysisRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM analyses
         ORDER BY created_at DESC, id DESC LIMIT ?1"
    );
    collect_records(conn, categories, &sql, Some(limit))
}

/// Total number of stored analyses.
pub fn count_analyses(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
    Ok(count)
}

/// Timestamp of the newest stored analysis, if any.
pub fn last_analysis_at(conn: &Connection) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT created_at FROM analyses ORDER BY created_at DESC, id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(result)
}

fn collect_records(
    conn: &Connection,
    categories: &CategorySet,
    sql: &str,
    limit: Option<u32>,
) -> Result<Vec<AnalysisRecord>> {
    let mut stmt = conn.prepare(sql)?;

    // Pull raw rows first; validation happens outside the rusqlite
    // closure so moderation errors surface as themselves.
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, String, String, String, String)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    };
    let rows: Vec<_> = match limit {
        Some(limit) => stmt
            .query_map(params![limit], map_row)?
            .collect::<rusqlite::Result<_>>()?,
        None => stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<_>>()?,
    };

    let mut records = Vec::with_capacity(rows.len());
    for (id, author, content, scores_json, action_label, created_at) in rows {
        let raw: RawScores = serde_json::from_str(&scores_json)
            .with_context(|| format!("Analysis {id} has malformed scores JSON"))?;
        let scores = ScoreVector::validate(categories, &raw)
            .with_context(|| format!("Analysis {id} does not match the configured categories"))?;
        let action = Action::parse(&action_label)
            .with_context(|| format!("Analysis {id} has an unknown action label"))?;
        records.push(AnalysisRecord {
            id,
            author,
            content,
            scores,
            action,
            created_at,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::moderation::RawScores;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn set() -> CategorySet {
        CategorySet::new(["toxic", "insult"]).unwrap()
    }

    fn vector(toxic: f64, insult: f64) -> ScoreVector {
        let raw: RawScores = [("toxic".to_string(), toxic), ("insult".to_string(), insult)]
            .into_iter()
            .collect();
        ScoreVector::validate(&set(), &raw).unwrap()
    }

    #[test]
    fn insert_and_read_back() {
        let conn = test_conn();
        let id = insert_analysis(&conn, "Alice", "some text", &vector(0.9, 0.1), Action::Flag)
            .unwrap();
        assert!(id > 0);

        let records = get_all_analyses(&conn, &set()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "Alice");
        assert_eq!(records[0].action, Action::Flag);
        assert_eq!(records[0].scores.get("toxic"), Some(0.9));
        assert!(!records[0].created_at.is_empty());
    }

    #[test]
    fn read_all_returns_insertion_order() {
        let conn = test_conn();
        for i in 0..3 {
            insert_analysis(
                &conn,
                &format!("user{i}"),
                "text",
                &vector(0.1, 0.1),
                Action::Allow,
            )
            .unwrap();
        }
        let records = get_all_analyses(&conn, &set()).unwrap();
        let authors: Vec<&str> = records.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["user0", "user1", "user2"]);
    }

    #[test]
    fn recent_returns_newest_first_and_honors_limit() {
        let conn = test_conn();
        for i in 0..5 {
            insert_analysis(
                &conn,
                &format!("user{i}"),
                "text",
                &vector(0.1, 0.1),
                Action::Allow,
            )
            .unwrap();
        }
        let records = get_recent_analyses(&conn, &set(), 2).unwrap();
        assert_eq!(records.len(), 2);
        // Timestamps share a second in-memory; id DESC breaks the tie.
        assert_eq!(records[0].author, "user4");
        assert_eq!(records[1].author, "user3");
    }

    #[test]
    fn count_and_last_timestamp() {
        let conn = test_conn();
        assert_eq!(count_analyses(&conn).unwrap(), 0);
        assert_eq!(last_analysis_at(&conn).unwrap(), None);

        insert_analysis(&conn, "Alice", "text", &vector(0.5, 0.0), Action::Review).unwrap();
        assert_eq!(count_analyses(&conn).unwrap(), 1);
        assert!(last_analysis_at(&conn).unwrap().is_some());
    }

    #[test]
    fn stale_action_label_fails_on_read() {
        let conn = test_conn();
        // Simulate the historical drift bug: a row stored with the old
        // "Block" vocabulary must fail loudly, not count as anything.
        conn.execute(
            "INSERT INTO analyses (author, content, scores, action)
             VALUES ('x', 'y', '{\"toxic\":0.9,\"insult\":0.1}', 'Block')",
            [],
        )
        .unwrap();
        assert!(get_all_analyses(&conn, &set()).is_err());
    }

    #[test]
    fn mismatched_stored_categories_fail_on_read() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO analyses (author, content, scores, action)
             VALUES ('x', 'y', '{\"toxic\":0.9}', 'FLAG')",
            [],
        )
        .unwrap();
        assert!(get_all_analyses(&conn, &set()).is_err());
    }
}
