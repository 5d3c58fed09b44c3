// Google Perspective API implementation.
//
// Perspective analyzes text for toxicity, identity attacks, insults, etc.
// It's free to use but rate-limited to ~1 QPS. The API is being sunset
// Dec 31, 2026 — this implementation is wrapped behind the TextClassifier
// trait so it can be swapped out when that happens.
//
// API docs: https://developers.perspectiveapi.com/s/about-the-api-methods

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CategorySet;
use crate::moderation::RawScores;
use crate::output::truncate_chars;

use super::rate_limiter::RateLimiter;
use super::traits::TextClassifier;

/// Map a configured category name onto the Perspective attribute that
/// stands in for it. Perspective has no direct "obscene" attribute, so
/// PROFANITY covers it; IDENTITY_ATTACK covers "identity_hate".
fn attribute_for(category: &str) -> Option<&'static str> {
    match category {
        "toxic" => Some("TOXICITY"),
        "severe_toxic" => Some("SEVERE_TOXICITY"),
        "obscene" => Some("PROFANITY"),
        "threat" => Some("THREAT"),
        "insult" => Some("INSULT"),
        "identity_hate" => Some("IDENTITY_ATTACK"),
        _ => None,
    }
}

/// Perspective API classifier.
///
/// Produces exactly one probability per configured category, keyed by the
/// category's configured name (not the Perspective attribute name), so the
/// result validates directly against the CategorySet.
pub struct PerspectiveClassifier {
    client: Client,
    api_key: String,
    rate_limiter: RateLimiter,
    /// (category name, Perspective attribute) in declaration order.
    attributes: Vec<(String, &'static str)>,
}

impl PerspectiveClassifier {
    /// Create a classifier covering the given category set.
    ///
    /// Fails if any configured category has no Perspective attribute to
    /// back it — better to refuse at startup than to return vectors that
    /// can never pass validation.
    pub fn new(api_key: String, categories: &CategorySet) -> Result<Self> {
        let mut attributes = Vec::with_capacity(categories.len());
        for name in categories.iter() {
            let attribute = attribute_for(name).with_context(|| {
                format!("Category '{name}' has no Perspective API attribute mapping")
            })?;
            attributes.push((name.to_string(), attribute));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            // Perspective free tier: 1 query per second
            rate_limiter: RateLimiter::new(Duration::from_secs(1)),
            attributes,
        })
    }
}

#[async_trait]
impl TextClassifier for PerspectiveClassifier {
    async fn classify(&self, text: &str) -> Result<RawScores> {
        // Respect rate limits before making the call
        self.rate_limiter.acquire().await;

        let url = format!(
            "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze?key={}",
            self.api_key
        );

        let request = PerspectiveRequest {
            comment: Comment {
                text: text.to_string(),
            },
            requested_attributes: self
                .attributes
                .iter()
                .map(|(_, attr)| (attr.to_string(), AttributeConfig {}))
                .collect(),
            languages: vec!["en".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to call Perspective API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Perspective API returned {}: {}", status, body);
        }

        let result: PerspectiveResponse = response
            .json()
            .await
            .context("Failed to parse Perspective API response")?;

        let mut scores = RawScores::with_capacity(self.attributes.len());
        for (category, attribute) in &self.attributes {
            let value = result
                .attribute_scores
                .get(*attribute)
                .map(|score| score.summary_score.value)
                .with_context(|| {
                    format!("Perspective response missing attribute {attribute}")
                })?;
            scores.insert(category.clone(), value);
        }

        // Char-aware truncation; byte slicing would panic on multi-byte
        // input whose 50th byte is mid-character.
        debug!(
            categories = scores.len(),
            text_preview = %truncate_chars(text, 50),
            "Classified text"
        );

        Ok(scores)
    }
}

// --- Perspective API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerspectiveRequest {
    comment: Comment,
    requested_attributes: HashMap<String, AttributeConfig>,
    languages: Vec<String>,
}

#[derive(Serialize)]
struct Comment {
    text: String,
}

#[derive(Serialize)]
struct AttributeConfig {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerspectiveResponse {
    attribute_scores: HashMap<String, AttributeScore>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Deserialize)]
struct SummaryScore {
    value: f64,
}
