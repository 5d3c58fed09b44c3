use std::env;

use anyhow::Result;

/// Default moderation threshold when neither env nor CLI override it.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// The default toxicity dimensions, in declaration order.
/// Declaration order is significant: it drives every tie-break in the
/// policy's category ranking and the analytics aggregation.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "toxic",
    "severe_toxic",
    "obscene",
    "threat",
    "insult",
    "identity_hate",
];

/// The default banned-word list for the keyword baseline.
pub const DEFAULT_BANNED_WORDS: [&str; 6] = ["idiot", "stupid", "hate", "kill", "damn", "hell"];

/// The fixed, ordered set of toxicity categories for this process.
///
/// Built once at startup and shared (immutably) by the classifier boundary,
/// the threshold policy, and the analytics aggregator. Every score vector
/// in the system is validated against this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Build a category set from a list of names.
    ///
    /// Names are trimmed; blank entries are rejected, as are duplicates
    /// (a duplicate would make score validation ambiguous). An empty list
    /// is accepted at the type level — the threshold policy is the
    /// component that refuses an empty score vector.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                anyhow::bail!("Category names must be non-empty");
            }
            if cleaned.iter().any(|existing| existing == trimmed) {
                anyhow::bail!("Duplicate category name: {trimmed}");
            }
            cleaned.push(trimmed.to_string());
        }
        Ok(Self { names: cleaned })
    }

    /// The default six-category toxicity set.
    pub fn default_toxicity() -> Self {
        // The defaults are static and known-valid, so this cannot fail.
        Self {
            names: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The declaration-order position of a category, if configured.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy. The loaded Config
/// is immutable for the process lifetime and passed by reference into
/// each component — there is no module-level mutable state.
pub struct Config {
    pub perspective_api_key: String,
    pub db_path: String,
    /// Moderation threshold used when the CLI doesn't override it.
    pub threshold: f64,
    /// The process-wide category set (PALISADE_CATEGORIES, comma-separated).
    pub categories: CategorySet,
    /// Banned terms for the keyword baseline (PALISADE_BANNED_WORDS).
    pub banned_words: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only db_path, threshold, categories, and banned words have defaults —
    /// the Perspective API key is required for anything beyond `init`,
    /// `recent`, `stats`, and `status`.
    pub fn load() -> Result<Self> {
        let threshold = match env::var("PALISADE_THRESHOLD") {
            Ok(raw) => raw
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("PALISADE_THRESHOLD is not a number: {raw}"))?,
            Err(_) => DEFAULT_THRESHOLD,
        };

        let categories = match env::var("PALISADE_CATEGORIES") {
            Ok(raw) => CategorySet::new(raw.split(','))?,
            Err(_) => CategorySet::default_toxicity(),
        };

        let banned_words = match env::var("PALISADE_BANNED_WORDS") {
            Ok(raw) => raw
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            Err(_) => DEFAULT_BANNED_WORDS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            perspective_api_key: env::var("PERSPECTIVE_API_KEY").unwrap_or_default(),
            db_path: env::var("PALISADE_DB_PATH").unwrap_or_else(|_| "./palisade.db".to_string()),
            threshold,
            categories,
            banned_words,
        })
    }

    /// Check that the Perspective API key is configured.
    /// Call this before any operation that needs the classifier.
    pub fn require_perspective(&self) -> Result<()> {
        if self.perspective_api_key.is_empty() {
            anyhow::bail!(
                "PERSPECTIVE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that at least one category is configured.
    /// Call this before any operation that classifies or aggregates.
    pub fn require_categories(&self) -> Result<()> {
        if self.categories.is_empty() {
            anyhow::bail!(
                "PALISADE_CATEGORIES is empty. Configure at least one category,\n\
                 or unset it to use the default six-category set."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_six_categories_in_order() {
        let set = CategorySet::default_toxicity();
        assert_eq!(set.len(), 6);
        assert_eq!(set.index_of("toxic"), Some(0));
        assert_eq!(set.index_of("identity_hate"), Some(5));
    }

    #[test]
    fn duplicate_category_rejected() {
        assert!(CategorySet::new(["toxic", "toxic"]).is_err());
    }

    #[test]
    fn blank_category_rejected() {
        assert!(CategorySet::new(["toxic", "  "]).is_err());
    }

    #[test]
    fn names_are_trimmed() {
        let set = CategorySet::new([" toxic ", "threat"]).unwrap();
        assert!(set.contains("toxic"));
        assert_eq!(set.index_of("threat"), Some(1));
    }

    #[test]
    fn empty_set_is_allowed_at_type_level() {
        let set = CategorySet::new(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unknown_category_not_found() {
        let set = CategorySet::default_toxicity();
        assert_eq!(set.index_of("spam"), None);
        assert!(!set.contains("spam"));
    }
}
