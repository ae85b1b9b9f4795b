//! Analysis configuration.
//!
//! All knobs are passed by value into the entry points; there is no
//! process-wide state, so batch runs stay deterministic and safe to
//! parallelize.

use crate::analysis::DetectionThresholds;
use crate::decode::MessageDecoder;
use crate::image::Channel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default pixel-count safeguard: 20 megapixels.
pub const DEFAULT_MAX_PIXELS: u64 = 20_000_000;

/// Default decode scan window, in bytes.
pub const DEFAULT_SCAN_LIMIT: usize = 1024;

/// Configuration for a single analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Color channel to extract the LSB plane from.
    pub channel: Channel,
    /// Entropy at or above this value counts toward the flag.
    pub entropy_threshold: f64,
    /// Chi-square at or below this value counts toward the flag.
    pub chi_square_threshold: f64,
    /// Maximum bytes reconstructed by the message decoder.
    pub decode_scan_limit: usize,
    /// Minimum printable-ASCII share for an accepted payload
    /// (0.0 disables the filter).
    pub min_printable_ratio: f64,
    /// Hard upper bound on image pixel count.
    pub max_pixels: u64,
    /// Include per-plane statistics for all 8 bit-planes in reports.
    pub bit_plane_export: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = DetectionThresholds::default();
        Self {
            channel: Channel::Blue,
            entropy_threshold: thresholds.min_entropy,
            chi_square_threshold: thresholds.max_chi_square,
            decode_scan_limit: DEFAULT_SCAN_LIMIT,
            min_printable_ratio: 0.8,
            max_pixels: DEFAULT_MAX_PIXELS,
            bit_plane_export: false,
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration for the given channel, rest defaulted.
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            channel,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pixels == 0 {
            return Err(ConfigError::InvalidMaxPixels);
        }
        if self.decode_scan_limit == 0 {
            return Err(ConfigError::InvalidScanLimit);
        }
        if !self.entropy_threshold.is_finite() || !self.chi_square_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold);
        }
        if !(0.0..=1.0).contains(&self.min_printable_ratio) {
            return Err(ConfigError::InvalidPrintableRatio);
        }
        Ok(())
    }

    /// Threshold policy derived from the configured bounds.
    pub fn thresholds(&self) -> DetectionThresholds {
        DetectionThresholds {
            min_entropy: self.entropy_threshold,
            max_chi_square: self.chi_square_threshold,
        }
    }

    /// Message decoder derived from the configured scan window.
    pub fn decoder(&self) -> MessageDecoder {
        MessageDecoder::with_printable_ratio(self.decode_scan_limit, self.min_printable_ratio)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("max_pixels must be at least 1")]
    InvalidMaxPixels,
    #[error("decode_scan_limit must be at least 1 byte")]
    InvalidScanLimit,
    #[error("thresholds must be finite numbers")]
    InvalidThreshold,
    #[error("min_printable_ratio must be within 0.0..=1.0")]
    InvalidPrintableRatio,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Report output configuration (consumed by the CLI layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name for the CSV batch report.
    pub report_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_name: "stegdet_report.csv".to_string(),
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.analysis.validate()?;
        Ok(config)
    }
}
