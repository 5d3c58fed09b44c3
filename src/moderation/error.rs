// Typed errors for the moderation core.
//
// These are a closed enum (rather than anyhow) because callers need to
// match on them: an empty score vector is a caller bug, while a schema
// mismatch points at the classifier or at stale stored data. The glue
// layers convert to anyhow at their own boundaries.

/// Errors raised by score validation, the threshold policy, and
/// action parsing. All are local and synchronous; none is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModerationError {
    /// The threshold policy was invoked with an empty score vector.
    /// Never silently defaulted to ALLOW.
    #[error("empty score vector: at least one category score is required")]
    EmptyInput,

    /// A raw score vector is missing a configured category. Missing
    /// categories are never treated as zero — that would silently
    /// corrupt the aggregated category counts.
    #[error("score vector is missing configured category '{0}'")]
    MissingCategory(String),

    /// A raw score vector contains a category the process isn't
    /// configured with. Unknown categories are never ignored.
    #[error("score vector contains unconfigured category '{0}'")]
    UnknownCategory(String),

    /// A probability fell outside [0.0, 1.0] (NaN included).
    #[error("score for '{category}' is {value}, outside [0.0, 1.0]")]
    OutOfRange { category: String, value: f64 },

    /// A stored action label didn't parse as a known Action variant.
    /// Unknown labels fail loudly on read rather than being counted
    /// under some default.
    #[error("unknown action label '{0}' (expected ALLOW, REVIEW, or FLAG)")]
    UnknownAction(String),
}
