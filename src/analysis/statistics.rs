//! Statistical scoring of extracted bit-streams.
//!
//! These statistics are descriptive only; whether a value is
//! suspicious is the threshold policy's call, not the analyzer's.

use crate::extraction::BitStream;
use serde::Serialize;

/// Entropy and chi-square scores for one bit-stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitStatistics {
    /// Shannon entropy of the bit distribution, in bits per bit
    /// symbol. Bounded in [0, 1]: 0 for a constant stream, 1.0 for a
    /// perfectly balanced one.
    pub entropy: f64,
    /// Chi-square goodness-of-fit against the uniform 50/50 split.
    /// Never negative; 0 means the observed counts match exactly.
    pub chi_square: f64,
    /// Number of bits analyzed.
    pub sample_size: usize,
}

impl BitStatistics {
    /// Computes both statistics over the stream.
    ///
    /// An empty stream scores 0 on both axes; no samples means no
    /// evidence of anything, never NaN.
    pub fn analyze(stream: &BitStream) -> Self {
        let total = stream.len();
        if total == 0 {
            return Self {
                entropy: 0.0,
                chi_square: 0.0,
                sample_size: 0,
            };
        }

        let ones = stream.count_ones();
        let zeros = total - ones;

        Self {
            entropy: Self::shannon_entropy(zeros, ones, total),
            chi_square: Self::chi_square(zeros, ones, total),
            sample_size: total,
        }
    }

    /// `H = -Σ p_i log2(p_i)` over {0, 1}, with `0·log2(0) = 0`.
    fn shannon_entropy(zeros: usize, ones: usize, total: usize) -> f64 {
        let mut entropy = 0.0;
        for count in [zeros, ones] {
            if count > 0 {
                let p = count as f64 / total as f64;
                entropy -= p * p.log2();
            }
        }
        entropy
    }

    /// `Σ (observed_i - expected_i)^2 / expected_i` with expected_i = total / 2.
    fn chi_square(zeros: usize, ones: usize, total: usize) -> f64 {
        let expected = total as f64 / 2.0;
        let d0 = zeros as f64 - expected;
        let d1 = ones as f64 - expected;
        (d0 * d0 + d1 * d1) / expected
    }
}
