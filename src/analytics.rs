// Analytics aggregation — a single-pass fold over stored decisions.
//
// The aggregator performs no I/O: the caller fetches the records and hands
// them over. Flagged/passed counting goes through Action::is_pass on the
// shared enum, so the aggregation can never drift from the vocabulary the
// policy actually produces.

use serde::Serialize;

use crate::config::CategorySet;
use crate::db::models::AnalysisRecord;

/// The per-category reporting cutoff for `category_counts`.
///
/// Intentionally independent of the caller-configurable moderation
/// threshold: the dashboard answers "how often does each category score
/// high", which should not shift when an operator tunes the policy.
/// Whether this should itself become configurable is a product decision,
/// not a bug.
pub const CATEGORY_REPORT_CUTOFF: f64 = 0.5;

/// Summary statistics over a history of moderation decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    /// Records visited.
    pub total_analyzed: u64,
    /// Records whose action was REVIEW or FLAG.
    pub total_flagged: u64,
    /// Records whose action was ALLOW.
    pub total_passed: u64,
    /// Percentage of passed records; 0 when there are no records.
    pub pass_rate: f64,
    /// Mean of each record's summed category mass (not of the per-record
    /// maximum); 0 when there are no records.
    pub avg_score: f64,
    /// Per category (declaration order), how many records scored it at or
    /// above CATEGORY_REPORT_CUTOFF.
    pub category_counts: Vec<(String, u64)>,
    /// The category with the highest count; ties go to the earliest
    /// declared category. None when there are no records.
    pub most_common_category: Option<String>,
}

/// Fold a stream of records into summary statistics.
///
/// Single pass, O(records x categories). The input may be empty; the
/// degenerate output (all rates and averages zero, no most-common
/// category) is defined, not an error.
pub fn summarize<'a, I>(categories: &CategorySet, records: I) -> AnalyticsSummary
where
    I: IntoIterator<Item = &'a AnalysisRecord>,
{
    let mut total_analyzed = 0u64;
    let mut total_flagged = 0u64;
    let mut total_mass = 0.0f64;
    let mut counts = vec![0u64; categories.len()];

    for record in records {
        total_analyzed += 1;
        if !record.action.is_pass() {
            total_flagged += 1;
        }
        total_mass += record.scores.total_mass();

        for (name, value) in record.scores.iter() {
            if value >= CATEGORY_REPORT_CUTOFF {
                if let Some(idx) = categories.index_of(name) {
                    counts[idx] += 1;
                }
            }
        }
    }

    let total_passed = total_analyzed - total_flagged;
    let (pass_rate, avg_score) = if total_analyzed > 0 {
        (
            100.0 * total_passed as f64 / total_analyzed as f64,
            total_mass / total_analyzed as f64,
        )
    } else {
        (0.0, 0.0)
    };

    // Strict > keeps the earliest declared category on ties.
    let most_common_category = if total_analyzed > 0 && !counts.is_empty() {
        let mut best_idx = 0;
        for (idx, &count) in counts.iter().enumerate().skip(1) {
            if count > counts[best_idx] {
                best_idx = idx;
            }
        }
        Some(categories.names()[best_idx].clone())
    } else {
        None
    };

    let category_counts = categories
        .names()
        .iter()
        .cloned()
        .zip(counts)
        .collect();

    AnalyticsSummary {
        total_analyzed,
        total_flagged,
        total_passed,
        pass_rate,
        avg_score,
        category_counts,
        most_common_category,
    }
}

/// Convenience lookup into `category_counts`.
impl AnalyticsSummary {
    pub fn count_for(&self, category: &str) -> u64 {
        self.category_counts
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
