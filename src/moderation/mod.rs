// Moderation core — the decision engine.
//
// Everything in this module is a pure, synchronous computation: score
// validation, the threshold policy, and the keyword baseline. No I/O,
// no shared state, no async. The classifier and database glue live in
// their own modules and only hand data across this boundary.

pub mod action;
pub mod baseline;
pub mod error;
pub mod policy;
pub mod scores;

pub use action::Action;
pub use baseline::KeywordReport;
pub use error::ModerationError;
pub use scores::{RawScores, ScoreVector};
