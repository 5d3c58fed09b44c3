// Batch analysis pipeline: a file of texts -> classified, decided, stored.
//
// Lines are classified with bounded concurrency (the classifier's own
// rate limiter still applies underneath), then persisted in line order so
// the log's insertion order matches the input file.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::classifier::TextClassifier;
use crate::config::Config;
use crate::db::Database;

use super::analyze;

/// Outcome counts for a batch run.
pub struct BatchOutcome {
    pub analyzed: usize,
    pub flagged: usize,
    pub failed: usize,
}

/// Analyze every non-empty line of `input`, persisting each decision.
///
/// A line that fails (classifier error, schema mismatch) is counted and
/// logged but doesn't abort the rest of the batch.
pub async fn run(
    classifier: &dyn TextClassifier,
    config: &Config,
    db: &Arc<dyn Database>,
    input: &str,
    author: Option<&str>,
    threshold: f64,
    concurrency: usize,
) -> Result<BatchOutcome> {
    let lines: Vec<String> = input
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("No non-empty lines to analyze");
    }

    info!(lines = lines.len(), concurrency, "Starting batch analysis");

    let bar = ProgressBar::new(lines.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .context("Invalid progress bar template")?,
    );

    // buffered (not buffer_unordered) keeps results in line order, so
    // insertion order matches the file.
    let results: Vec<Result<analyze::Analysis>> = stream::iter(lines.iter())
        .map(|line| {
            let bar = bar.clone();
            async move {
                let result = analyze::run(classifier, config, author, line, threshold).await;
                bar.inc(1);
                result
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    bar.finish_and_clear();

    let mut outcome = BatchOutcome {
        analyzed: 0,
        flagged: 0,
        failed: 0,
    };

    for result in results {
        match result {
            Ok(analysis) => {
                db.insert_analysis(
                    &analysis.author,
                    &analysis.content,
                    &analysis.scores,
                    analysis.action,
                )
                .await?;
                outcome.analyzed += 1;
                if !analysis.action.is_pass() {
                    outcome.flagged += 1;
                }
            }
            Err(e) => {
                warn!(error = %e, "Skipping line that failed analysis");
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
