// Validated score vectors.
//
// The classifier boundary hands back a raw map of category -> probability.
// Before anything downstream touches it, the map is validated against the
// process-wide CategorySet: exactly one entry per configured category,
// every value in [0.0, 1.0]. ScoreVector is the proof of that validation —
// the policy and the aggregator accept nothing else.

use std::collections::HashMap;

use crate::config::CategorySet;

use super::error::ModerationError;

/// Raw classifier output, keyed by category name. Unvalidated.
pub type RawScores = HashMap<String, f64>;

/// A score vector validated against the configured category set.
///
/// Entries are held in category declaration order, which makes the
/// ranking tie-break (and the aggregator's category iteration) stable
/// without further sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector {
    entries: Vec<(String, f64)>,
}

impl ScoreVector {
    /// Validate a raw classifier result against the category set.
    ///
    /// Fails if any configured category is missing, any unconfigured
    /// category is present, or any value is outside [0.0, 1.0] (NaN
    /// included). Missing categories are never defaulted to zero and
    /// unknown ones are never dropped — both would corrupt analytics
    /// invisibly.
    pub fn validate(categories: &CategorySet, raw: &RawScores) -> Result<Self, ModerationError> {
        let mut entries = Vec::with_capacity(categories.len());
        for name in categories.iter() {
            let value = *raw
                .get(name)
                .ok_or_else(|| ModerationError::MissingCategory(name.to_string()))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ModerationError::OutOfRange {
                    category: name.to_string(),
                    value,
                });
            }
            entries.push((name.to_string(), value));
        }

        if raw.len() != categories.len() {
            // Report the first unknown key deterministically.
            let mut unknown: Vec<&String> =
                raw.keys().filter(|k| !categories.contains(k.as_str())).collect();
            unknown.sort();
            if let Some(first) = unknown.first() {
                return Err(ModerationError::UnknownCategory((*first).to_string()));
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (category, probability) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| *value)
    }

    /// The highest probability in the vector, or None when empty.
    pub fn max_score(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|(_, value)| *value)
            .fold(None, |max, v| match max {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }

    /// The summed category mass of this vector.
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Categories ranked by probability descending.
    ///
    /// A read-only display query: the action decision depends only on the
    /// maximum value, never on which category attains it. Ties keep the
    /// declaration order (stable sort).
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Serialize to a JSON object for storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), serde_json::json!(value));
        }
        serde_json::to_string(&serde_json::Value::Object(map))
    }
}
