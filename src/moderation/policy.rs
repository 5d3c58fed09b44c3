// The threshold policy — probability vector in, moderation action out.
//
// Pure function of (scores, threshold). The decision depends only on the
// maximum probability in the vector, never on which category attains it.

use super::action::Action;
use super::error::ModerationError;
use super::scores::ScoreVector;

/// How far above the threshold the maximum score must sit to escalate
/// from REVIEW to FLAG.
pub const FLAG_MARGIN: f64 = 0.2;

/// Decide the moderation action for a validated score vector.
///
/// Bands, for `max = max(scores)`:
///   max >= threshold + 0.2  ->  FLAG
///   max >= threshold        ->  REVIEW
///   otherwise               ->  ALLOW
///
/// Returns the action together with its severity rank (0/1/2) so callers
/// can render or sort without string comparisons.
///
/// `threshold` is expected in [0.0, 1.0] but values outside that range are
/// accepted: the bands simply degenerate (e.g. threshold 0.9 makes FLAG
/// unreachable since probabilities can't exceed 1.0). An empty vector is
/// an error — it is never silently mapped to ALLOW.
pub fn determine_action(
    scores: &ScoreVector,
    threshold: f64,
) -> Result<(Action, u8), ModerationError> {
    let max_score = scores.max_score().ok_or(ModerationError::EmptyInput)?;

    let action = if max_score >= threshold + FLAG_MARGIN {
        Action::Flag
    } else if max_score >= threshold {
        Action::Review
    } else {
        Action::Allow
    };

    Ok((action, action.severity_rank()))
}
