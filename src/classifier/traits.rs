// Text classifier trait — the swap-ready oracle abstraction.
//
// A classifier turns raw text into one probability per configured
// category. Its output is unvalidated (RawScores); the moderation core
// validates it against the CategorySet before anything else touches it.

use anyhow::Result;
use async_trait::async_trait;

use crate::moderation::RawScores;

/// Trait for per-category toxicity classification. Implementations must
/// be async because real providers sit behind HTTP APIs. Batching lives
/// in the pipeline, which fans single calls out with bounded concurrency.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify a single text, returning a probability per category.
    async fn classify(&self, text: &str) -> Result<RawScores>;
}
