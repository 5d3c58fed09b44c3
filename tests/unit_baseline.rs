// Unit tests for the keyword baseline.
//
// The baseline runs for comparison only; these tests pin its documented
// behavior, including the substring false-positive it exists to
// demonstrate.

use palisade::config::DEFAULT_BANNED_WORDS;
use palisade::moderation::baseline::keyword_scan;
use palisade::moderation::KeywordReport;

fn default_words() -> Vec<String> {
    DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect()
}

// ============================================================
// Matching
// ============================================================

#[test]
fn detects_a_single_banned_word() {
    let report = keyword_scan(
        "You are an idiot",
        &["idiot".to_string(), "hate".to_string()],
    );
    assert_eq!(report, KeywordReport::Matches(vec!["idiot".to_string()]));
}

#[test]
fn detects_multiple_words_in_configured_order() {
    // "hate" occurs before "damn" in the text; the configured list
    // order wins.
    let report = keyword_scan("damn, I hate this", &default_words());
    assert_eq!(
        report,
        KeywordReport::Matches(vec!["hate".to_string(), "damn".to_string()])
    );
}

#[test]
fn matching_ignores_case_in_both_directions() {
    let report = keyword_scan("you IDIOT", &["Idiot".to_string()]);
    assert!(report.matched());
}

// ============================================================
// The documented substring false-positive
// ============================================================

#[test]
fn hell_matches_inside_hello() {
    // This is why the keyword filter is a baseline, not the decision
    // mechanism. It must not be "fixed" to word-boundary matching.
    let report = keyword_scan("hello", &["hell".to_string()]);
    assert_eq!(report, KeywordReport::Matches(vec!["hell".to_string()]));
}

#[test]
fn kill_matches_inside_skill() {
    let report = keyword_scan("a display of great skill", &default_words());
    assert_eq!(report, KeywordReport::Matches(vec!["kill".to_string()]));
}

// ============================================================
// The no-match sentinel
// ============================================================

#[test]
fn clean_text_yields_the_sentinel_not_an_empty_list() {
    let report = keyword_scan("what a lovely morning", &default_words());
    assert_eq!(report, KeywordReport::NoMatches);
    assert_ne!(report, KeywordReport::Matches(Vec::new()));
}

#[test]
fn sentinel_renders_a_human_message() {
    assert_eq!(
        keyword_scan("fine", &default_words()).to_string(),
        "No keywords detected"
    );
    assert_eq!(
        keyword_scan("you idiot", &default_words()).to_string(),
        "Keyword filter detection: idiot"
    );
}

#[test]
fn empty_banned_list_never_matches() {
    let report = keyword_scan("anything at all", &[]);
    assert_eq!(report, KeywordReport::NoMatches);
}
