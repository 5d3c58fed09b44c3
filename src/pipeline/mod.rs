// Pipelines — the workflows that connect classifier, policy, baseline,
// and storage.
//
// analyze: one text through the full decision path.
// batch:   a file of texts with bounded concurrency and a progress bar.

pub mod analyze;
pub mod batch;
