// Palisade: toxicity moderation decisions and analytics.
//
// This is the library root. Each module corresponds to a major subsystem
// of the moderation pipeline.

pub mod analytics;
pub mod classifier;
pub mod config;
pub mod db;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod status;
