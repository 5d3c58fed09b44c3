// Composition tests — the full decision path chained together:
//   raw scores -> validation -> policy -> storage -> aggregation
// without any network calls; the database runs in memory.

use std::sync::Arc;

use palisade::analytics::summarize;
use palisade::config::CategorySet;
use palisade::db::models::resolve_author;
use palisade::db::schema::create_tables;
use palisade::db::sqlite::SqliteDatabase;
use palisade::db::Database;
use palisade::moderation::baseline::keyword_scan;
use palisade::moderation::policy::determine_action;
use palisade::moderation::{Action, RawScores, ScoreVector};
use rusqlite::Connection;

fn categories() -> CategorySet {
    CategorySet::default_toxicity()
}

fn memory_db() -> Arc<dyn Database> {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    Arc::new(SqliteDatabase::new(conn, categories()))
}

fn raw(overrides: &[(&str, f64)]) -> RawScores {
    let mut map: RawScores = categories()
        .iter()
        .map(|name| (name.to_string(), 0.0))
        .collect();
    for (name, value) in overrides {
        map.insert(name.to_string(), *value);
    }
    map
}

/// Classifier output -> validated vector -> decision -> stored record.
async fn decide_and_store(
    db: &Arc<dyn Database>,
    author: Option<&str>,
    content: &str,
    overrides: &[(&str, f64)],
    threshold: f64,
) -> Action {
    let scores = ScoreVector::validate(&categories(), &raw(overrides)).unwrap();
    let (action, _) = determine_action(&scores, threshold).unwrap();
    db.insert_analysis(&resolve_author(author), content, &scores, action)
        .await
        .unwrap();
    action
}

// ============================================================
// Chain: decide -> store -> read back -> aggregate
// ============================================================

#[tokio::test]
async fn decisions_flow_through_storage_into_analytics() {
    let db = memory_db();

    let a1 = decide_and_store(&db, Some("John Smith"), "awful film", &[("toxic", 0.9)], 0.5).await;
    let a2 = decide_and_store(&db, Some("Alice Doe"), "shills!", &[("insult", 0.55)], 0.5).await;
    let a3 = decide_and_store(&db, None, "nice day", &[("toxic", 0.05)], 0.5).await;

    assert_eq!(a1, Action::Flag);
    assert_eq!(a2, Action::Review);
    assert_eq!(a3, Action::Allow);

    let records = db.get_all_analyses().await.unwrap();
    assert_eq!(records.len(), 3);

    let summary = summarize(&categories(), &records);
    assert_eq!(summary.total_analyzed, 3);
    assert_eq!(summary.total_flagged, 2);
    assert_eq!(summary.total_passed, 1);
    assert!((summary.pass_rate - 100.0 / 3.0).abs() < 1e-9);
    // Only the 0.9 toxic and 0.55 insult clear the 0.5 reporting cutoff.
    assert_eq!(summary.count_for("toxic"), 1);
    assert_eq!(summary.count_for("insult"), 1);
    assert_eq!(summary.most_common_category, Some("toxic".to_string()));
}

#[tokio::test]
async fn stored_actions_survive_the_round_trip_as_the_same_enum() {
    let db = memory_db();
    decide_and_store(&db, Some("A"), "x", &[("threat", 0.95)], 0.5).await;

    let records = db.get_all_analyses().await.unwrap();
    // The record's action is the same closed enum the policy produced —
    // counting it can't drift from the policy vocabulary.
    assert_eq!(records[0].action, Action::Flag);
    assert_eq!(records[0].action.severity_rank(), 2);
    assert!(!records[0].action.is_pass());
}

#[tokio::test]
async fn anonymous_author_is_stored_with_the_sentinel() {
    let db = memory_db();
    decide_and_store(&db, None, "text", &[], 0.5).await;
    decide_and_store(&db, Some("   "), "text", &[], 0.5).await;

    let records = db.get_all_analyses().await.unwrap();
    assert_eq!(records[0].author, "Anonymous User");
    assert_eq!(records[1].author, "Anonymous User");
}

#[tokio::test]
async fn recent_listing_is_newest_first_while_aggregation_reads_insertion_order() {
    let db = memory_db();
    for i in 0..6 {
        let name = format!("user{i}");
        decide_and_store(&db, Some(name.as_str()), "text", &[], 0.5).await;
    }

    let recent = db.get_recent_analyses(5).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].author, "user5");
    assert_eq!(recent[4].author, "user1");

    let all = db.get_all_analyses().await.unwrap();
    assert_eq!(all[0].author, "user0");
    assert_eq!(all[5].author, "user5");
}

// ============================================================
// The baseline runs beside the decision, never inside it
// ============================================================

#[tokio::test]
async fn keyword_hits_do_not_change_the_action() {
    let banned = vec!["hell".to_string()];

    // Text trips the keyword filter but the classifier sees it as benign.
    let report = keyword_scan("hello there", &banned);
    assert!(report.matched());

    let scores = ScoreVector::validate(&categories(), &raw(&[("toxic", 0.02)])).unwrap();
    let (action, _) = determine_action(&scores, 0.5).unwrap();
    assert_eq!(action, Action::Allow);
}

// ============================================================
// Aggregation over history read back from storage is idempotent
// ============================================================

#[tokio::test]
async fn aggregating_a_reread_history_is_stable() {
    let db = memory_db();
    decide_and_store(&db, Some("A"), "x", &[("toxic", 0.8)], 0.5).await;
    decide_and_store(&db, Some("B"), "y", &[("obscene", 0.6)], 0.5).await;

    let first = summarize(&categories(), &db.get_all_analyses().await.unwrap());
    let second = summarize(&categories(), &db.get_all_analyses().await.unwrap());
    assert_eq!(first, second);
}
