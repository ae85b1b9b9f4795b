//! Flagging thresholds for suspicious bit distributions.
//!
//! The detection heuristic: an embedded payload tends to leave the
//! LSB plane looking *too* uniform, so the flag fires on high entropy
//! combined with low chi-square deviation. Which deviation direction
//! truly indicates hiding is a tunable policy, not ground truth; both
//! bounds always come from configuration.

use super::statistics::BitStatistics;
use serde::{Deserialize, Serialize};

/// Threshold policy deciding when statistics look suspicious.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionThresholds {
    /// Entropy at or above this value counts toward suspicion.
    pub min_entropy: f64,
    /// Chi-square at or below this value counts toward suspicion.
    pub max_chi_square: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            min_entropy: 0.997,  // Near-balanced bit counts
            max_chi_square: 3.84, // 95% quantile of chi-square, 1 dof
        }
    }
}

impl DetectionThresholds {
    /// Thresholds that flag more aggressively (for triage sweeps).
    pub fn strict() -> Self {
        Self {
            min_entropy: 0.98,
            max_chi_square: 10.0,
        }
    }

    /// Thresholds that almost never flag (for noisy sources).
    pub fn permissive() -> Self {
        Self {
            min_entropy: 0.9999,
            max_chi_square: 0.5,
        }
    }

    /// Checks statistics against the policy.
    ///
    /// Returns a [`Suspicion`] when both conditions hold: the stream
    /// is near-maximally random *and* deviates less from 50/50 than
    /// natural sensor noise usually does.
    pub fn check(&self, stats: &BitStatistics) -> Option<Suspicion> {
        if stats.sample_size == 0 {
            return None;
        }

        if stats.entropy >= self.min_entropy && stats.chi_square <= self.max_chi_square {
            return Some(Suspicion::UniformBitPlane {
                entropy: stats.entropy,
                chi_square: stats.chi_square,
            });
        }

        None
    }
}

/// Why an image was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum Suspicion {
    /// A decodable text payload was recovered from the LSB stream.
    #[error("decoded a hidden payload from the LSB stream")]
    DecodedPayload,

    /// The LSB plane's bit distribution is suspiciously uniform.
    #[error("suspiciously uniform bit plane (entropy {entropy:.4}, chi-square {chi_square:.4})")]
    UniformBitPlane {
        /// Observed entropy.
        entropy: f64,
        /// Observed chi-square statistic.
        chi_square: f64,
    },
}
