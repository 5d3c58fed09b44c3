// System status display — DB stats, record counts, config summary.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::db::Database;
use crate::output;

/// Display system status to the terminal.
/// The caller has already verified the database file exists.
pub async fn show(db: &Arc<dyn Database>, config: &Config) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    let count = db.count_analyses().await?;
    match db.last_analysis_at().await? {
        Some(last) => println!(
            "Analyses: {} stored (newest {})",
            count,
            output::relative_time(&last)
        ),
        None => {
            println!("Analyses: none stored yet");
            println!("  Run `palisade analyze` to record one");
        }
    }

    println!("Threshold: {:.2} (default for this process)", config.threshold);
    println!(
        "Categories: {} configured ({})",
        config.categories.len(),
        config.categories.names().join(", ")
    );
    println!("Banned words: {} configured", config.banned_words.len());

    if config.perspective_api_key.is_empty() {
        println!("Classifier: Perspective API key not set");
    } else {
        println!("Classifier: Perspective API (key configured)");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
