// The moderation action vocabulary.
//
// Action is a single closed enum shared by the threshold policy (which
// produces it) and the analytics aggregator (which counts it). Keeping
// both sides on one type means a stale label string can't silently
// stop matching — the historical failure mode this replaces.

use serde::{Deserialize, Serialize};

use super::error::ModerationError;

/// The three moderation actions, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Allow,
    Review,
    Flag,
}

impl Action {
    /// Severity ordinal: 0 = ALLOW, 1 = REVIEW, 2 = FLAG.
    /// Exposed so callers can render or sort without string comparisons.
    pub fn severity_rank(self) -> u8 {
        match self {
            Action::Allow => 0,
            Action::Review => 1,
            Action::Flag => 2,
        }
    }

    /// Whether this action lets the content through. REVIEW and FLAG
    /// are both "non-pass" for analytics purposes.
    pub fn is_pass(self) -> bool {
        matches!(self, Action::Allow)
    }

    /// The canonical wire/storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Allow => "ALLOW",
            Action::Review => "REVIEW",
            Action::Flag => "FLAG",
        }
    }

    /// Parse a stored label. Unknown labels are an error, not a default.
    pub fn parse(label: &str) -> Result<Self, ModerationError> {
        match label {
            "ALLOW" => Ok(Action::Allow),
            "REVIEW" => Ok(Action::Review),
            "FLAG" => Ok(Action::Flag),
            other => Err(ModerationError::UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
