//! Detection metrics module.
//!
//! This module turns accounting sets into scores and reports. It includes:
//!
//! - `Scorer` - True/false positive counts, precision, recall, F1, best match
//! - `MatchCountSummary` - Distribution of per-object match counts
//! - `MatchReport` - Serializable snapshot of every output for one match set
//! - `MatchAccumulator` - Pooled counts over many frames

mod accumulator;
mod report;
mod scores;
mod summary;

pub use accumulator::{FrameCounts, MatchAccumulator};
pub use report::MatchReport;
pub use scores::Scorer;
pub use summary::{summary_line, MatchCountSummary};
