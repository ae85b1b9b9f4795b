//! Statistical analysis and flagging policy.
//!
//! The analyzer computes descriptive scores for a bit-stream; the
//! threshold policy decides, from configuration, whether those scores
//! look like hidden data. Keeping the two apart keeps the analyzer
//! reusable for the all-plane survey.

mod statistics;
mod threshold;

pub use statistics::BitStatistics;
pub use threshold::{DetectionThresholds, Suspicion};
