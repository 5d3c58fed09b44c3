// Classifier boundary — trait-based abstraction for swappable providers.
//
// The TextClassifier trait defines the oracle interface: text in, one
// probability per category out. PerspectiveClassifier implements it using
// Google's Perspective API. When Perspective sunsets (Dec 2026), we swap
// in a different implementation without touching the moderation core.

pub mod perspective;
pub mod rate_limiter;
pub mod traits;

pub use traits::TextClassifier;
