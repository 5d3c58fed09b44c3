// Colored terminal output for decisions, listings, and the analytics
// dashboard.
//
// This module handles all terminal-specific formatting: colors, bars,
// tables. The main.rs command handlers delegate here. Nothing in this
// module mutates what it renders.

use colored::{ColoredString, Colorize};

use crate::analytics::AnalyticsSummary;
use crate::config::CategorySet;
use crate::db::models::AnalysisRecord;
use crate::moderation::{Action, KeywordReport, ScoreVector};
use crate::pipeline::analyze::Analysis;

/// Display cutoffs for the per-category risk bars. These are rendering
/// constants only — the moderation threshold is configured separately
/// and the two are deliberately unrelated.
const HIGH_RISK_CUTOFF: f64 = 0.5;
const MEDIUM_RISK_CUTOFF: f64 = 0.3;

/// How many of the top-ranked categories to show per analysis.
const TOP_CATEGORIES_SHOWN: usize = 2;

const BAR_WIDTH: usize = 20;

/// Render an action tag in its conventional color:
/// FLAG red, REVIEW yellow, ALLOW green.
pub fn colorize_action(action: Action) -> ColoredString {
    match action {
        Action::Flag => action.as_str().red().bold(),
        Action::Review => action.as_str().yellow().bold(),
        Action::Allow => action.as_str().green().bold(),
    }
}

/// A probability bar colored by display risk level.
fn render_bar(prob: f64) -> ColoredString {
    let filled = ((prob * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    if prob >= HIGH_RISK_CUTOFF {
        bar.red()
    } else if prob >= MEDIUM_RISK_CUTOFF {
        bar.yellow()
    } else {
        bar.green()
    }
}

/// Human label for a category name: "severe_toxic" -> "Severe Toxic".
fn category_label(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_top_categories(scores: &ScoreVector) {
    for (name, prob) in scores.ranked().into_iter().take(TOP_CATEGORIES_SHOWN) {
        println!(
            "    {:<14} {} {:.2}",
            category_label(name),
            render_bar(prob),
            prob
        );
    }
}

/// Display one completed analysis: author, content preview, top
/// categories, the action, and the keyword-baseline comparison.
pub fn display_analysis(analysis: &Analysis) {
    println!("\n  {} ({})", analysis.author.bold(), "just now".dimmed());
    println!("  {}", super::truncate_chars(&analysis.content, 120));
    println!();
    display_top_categories(&analysis.scores);
    println!();
    print_action_row(analysis.action, &analysis.baseline);
}

fn print_action_row(action: Action, baseline: &KeywordReport) {
    // The baseline is shown for contrast only; it never influenced the action.
    println!(
        "    {}  {}",
        colorize_action(action),
        baseline.to_string().dimmed()
    );
}

/// Display stored analyses newest-first, as returned by the recent query.
pub fn display_recent(records: &[AnalysisRecord]) {
    if records.is_empty() {
        println!("No analyses stored yet. Run `palisade analyze` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent Analyses ({}) ===", records.len()).bold()
    );

    for record in records {
        println!(
            "\n  {} ({})",
            record.author.bold(),
            super::relative_time(&record.created_at).dimmed()
        );
        println!("  {}", super::truncate_chars(&record.content, 120));
        display_top_categories(&record.scores);
        println!("    {}", colorize_action(record.action));
    }
    println!();
}

/// Display the analytics dashboard summary.
pub fn display_summary(summary: &AnalyticsSummary, categories: &CategorySet) {
    println!("\n{}", "=== Moderation Analytics ===".bold());
    println!();
    println!("  Analyzed:   {}", summary.total_analyzed);
    println!(
        "  Flagged:    {}",
        summary.total_flagged.to_string().red()
    );
    println!(
        "  Pass rate:  {}",
        format!("{:.1}%", summary.pass_rate).green()
    );
    println!("  Avg score:  {:.2}", summary.avg_score);
    println!();

    match &summary.most_common_category {
        Some(category) => {
            println!(
                "  Most common type: {} ({})",
                category_label(category).bold(),
                summary.count_for(category)
            );
        }
        None => println!("  Most common type: {}", "none".dimmed()),
    }

    if summary.total_analyzed > 0 {
        println!("\n  High-scoring records per category (>= 0.5):");
        for name in categories.iter() {
            let count = summary.count_for(name);
            println!("    {:<14} {}", category_label(name), count);
        }
    }
    println!();
}
