// Single-text analysis workflow: classify -> validate -> decide -> report.
//
// This is the orchestration seam between the async glue (classifier HTTP
// call) and the pure moderation core. Persistence is the caller's choice;
// run() itself never writes.

use anyhow::{Context, Result};
use tracing::debug;

use crate::classifier::TextClassifier;
use crate::config::Config;
use crate::db::models::resolve_author;
use crate::moderation::{baseline, policy, Action, KeywordReport, ScoreVector};

/// One completed analysis, ready for display and (optionally) storage.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub author: String,
    pub content: String,
    pub scores: ScoreVector,
    pub action: Action,
    pub severity_rank: u8,
    /// What a naive keyword filter would have said — comparison only,
    /// never part of the decision.
    pub baseline: KeywordReport,
}

/// Run one text through the full decision path.
///
/// Empty or whitespace-only content is refused before the classifier is
/// called. The raw classifier result is validated against the configured
/// categories; the threshold policy then decides the action.
pub async fn run(
    classifier: &dyn TextClassifier,
    config: &Config,
    author: Option<&str>,
    content: &str,
    threshold: f64,
) -> Result<Analysis> {
    let content = content.trim();
    if content.is_empty() {
        anyhow::bail!("Please enter content to analyze");
    }

    let raw = classifier
        .classify(content)
        .await
        .context("Classifier call failed")?;
    let scores = ScoreVector::validate(&config.categories, &raw)?;
    let (action, severity_rank) = policy::determine_action(&scores, threshold)?;
    let report = baseline::keyword_scan(content, &config.banned_words);

    debug!(
        action = %action,
        severity_rank,
        max_score = scores.max_score().unwrap_or(0.0),
        "Decision made"
    );

    Ok(Analysis {
        author: resolve_author(author),
        content: content.to_string(),
        scores,
        action,
        severity_rank,
        baseline: report,
    })
}
