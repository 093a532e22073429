//! Drift detection: snapshot-to-snapshot deltas within a lookback window.

pub mod brief;
pub mod detector;
pub mod history;
pub mod types;

pub use brief::{DailyBrief, DailyBriefBuilder};
pub use detector::{rank_movements, DriftDetector};
pub use history::SnapshotHistory;
pub use types::*;
