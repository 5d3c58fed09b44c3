// The keyword baseline — what a naive word filter would have said.
//
// Runs alongside the classifier purely for side-by-side comparison in the
// output; it never feeds the action decision. The point of showing it is
// exactly its weakness: case-insensitive substring matching false-positives
// on benign words (banned "hell" matches inside "hello"). That behavior is
// intentional and kept — it's the argument for the classifier.

/// The result of scanning text against the banned-term list.
///
/// `NoMatches` is a distinct variant rather than an empty list so callers
/// can render a human message without inspecting list length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordReport {
    /// The banned terms found in the text, in configured-list order
    /// (not order of occurrence).
    Matches(Vec<String>),
    NoMatches,
}

impl KeywordReport {
    pub fn matched(&self) -> bool {
        matches!(self, KeywordReport::Matches(_))
    }
}

impl std::fmt::Display for KeywordReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordReport::Matches(terms) => {
                write!(f, "Keyword filter detection: {}", terms.join(", "))
            }
            KeywordReport::NoMatches => write!(f, "No keywords detected"),
        }
    }
}

/// Scan text for banned terms as case-insensitive substrings.
///
/// Pure function; no interaction with the threshold policy.
pub fn keyword_scan(text: &str, banned_words: &[String]) -> KeywordReport {
    let lowered = text.to_lowercase();
    let matches: Vec<String> = banned_words
        .iter()
        .filter(|word| lowered.contains(&word.to_lowercase()))
        .cloned()
        .collect();

    if matches.is_empty() {
        KeywordReport::NoMatches
    } else {
        KeywordReport::Matches(matches)
    }
}
