//! Per-image analysis reports.
//!
//! An [`ImageReport`] is the pipeline's unit of output: one immutable,
//! serializable record per analyzed image. Reporting collaborators
//! (CSV export, a GUI) format these without re-running analysis.

mod batch;

pub use batch::{BatchAggregator, BatchResult};

use crate::analysis::{BitStatistics, Suspicion};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::extraction::{BitPlane, PLANE_COUNT};
use crate::image::{Channel, ChannelPlane, PixelGrid};
use serde::Serialize;

/// Statistics for one bit-plane in the all-plane survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneStatistics {
    /// Bit position (0 = LSB .. 7 = MSB).
    pub plane: u8,
    /// Scores for this plane's bit-stream.
    pub stats: BitStatistics,
}

/// Findings for a single analyzed image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    /// Source identifier (usually the file path), opaque to the core.
    pub source: String,
    /// Channel the LSB plane was taken from.
    pub channel: Channel,
    /// Recovered payload, if any. Absent is the normal outcome for
    /// clean images, not an error.
    pub decoded_message: Option<String>,
    /// LSB-stream statistics; absent when analysis failed.
    pub stats: Option<BitStatistics>,
    /// Per-plane survey across all 8 bit-planes; empty unless
    /// `bit_plane_export` is enabled.
    pub plane_stats: Vec<PlaneStatistics>,
    /// Whether this image looks like it carries hidden data.
    pub flagged: bool,
    /// Why the flag fired, when it did.
    pub suspicion: Option<Suspicion>,
    /// Analysis failure, recorded instead of propagated in batch runs.
    pub error: Option<AnalysisError>,
}

impl ImageReport {
    /// Runs the full detection pipeline over one image.
    ///
    /// Checks the pixel-count safeguard first, then extracts the
    /// configured channel's LSB plane, decodes and scores its stream,
    /// and applies the flagging policy. The flag fires when a payload
    /// was decoded or the threshold policy reports suspicion.
    ///
    /// Errors are returned directly; batch runs convert them into
    /// error reports via [`ImageReport::from_error`].
    pub fn analyze(
        grid: &PixelGrid,
        source: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let source = source.into();

        let pixels = grid.pixel_count();
        if pixels > config.max_pixels {
            return Err(AnalysisError::UnsupportedImage {
                pixels,
                max_pixels: config.max_pixels,
            });
        }

        let plane = grid.channel_plane(config.channel)?;
        let lsb = BitPlane::extract(&plane, 0)?;
        let stream = lsb.to_stream();

        let decoded_message = config.decoder().decode(&stream);
        let stats = BitStatistics::analyze(&stream);

        let suspicion = if decoded_message.is_some() {
            Some(Suspicion::DecodedPayload)
        } else {
            config.thresholds().check(&stats)
        };

        let plane_stats = if config.bit_plane_export {
            Self::survey_planes(&plane)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            source = %source,
            channel = %config.channel,
            entropy = stats.entropy,
            chi_square = stats.chi_square,
            flagged = suspicion.is_some(),
            "image analyzed"
        );

        Ok(Self {
            source,
            channel: config.channel,
            decoded_message,
            stats: Some(stats),
            plane_stats,
            flagged: suspicion.is_some(),
            suspicion,
            error: None,
        })
    }

    /// Builds the error record used by batch runs. Never flagged.
    pub fn from_error(source: impl Into<String>, channel: Channel, error: AnalysisError) -> Self {
        Self {
            source: source.into(),
            channel,
            decoded_message: None,
            stats: None,
            plane_stats: Vec::new(),
            flagged: false,
            suspicion: None,
            error: Some(error),
        }
    }

    /// Scores every bit-plane of the channel independently.
    fn survey_planes(plane: &ChannelPlane) -> Result<Vec<PlaneStatistics>, AnalysisError> {
        (0..PLANE_COUNT)
            .map(|bit_index| {
                let bits = BitPlane::extract(plane, bit_index)?;
                Ok(PlaneStatistics {
                    plane: bit_index,
                    stats: BitStatistics::analyze(&bits.to_stream()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Embeds `payload` bytes (plus a 0x00 sentinel) in the blue-channel
    /// LSBs of an RGB grid large enough to hold them.
    pub(crate) fn grid_with_blue_payload(payload: &[u8], extra_pixels: usize) -> PixelGrid {
        let mut bits: Vec<u8> = payload
            .iter()
            .chain(std::iter::once(&0u8))
            .flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1))
            .collect();
        bits.resize(bits.len() + extra_pixels, 0);

        let width = bits.len() as u32;
        let samples: Vec<u8> = bits
            .iter()
            .flat_map(|&bit| [100, 150, 200 | bit])
            .collect();
        PixelGrid::new(samples, width, 1, 3).unwrap()
    }

    #[test]
    fn test_payload_recovered_and_flagged() {
        let grid = grid_with_blue_payload(b"HI", 16);
        let report = ImageReport::analyze(&grid, "hi.png", &AnalysisConfig::default()).unwrap();

        assert_eq!(report.decoded_message.as_deref(), Some("HI"));
        assert!(report.flagged);
        assert_eq!(report.suspicion, Some(Suspicion::DecodedPayload));
        assert!(report.error.is_none());
    }

    #[test]
    fn test_clean_skewed_image_not_flagged() {
        // Blue LSBs all zero: entropy 0, chi-square = sample count.
        let samples: Vec<u8> = (0..300).flat_map(|i| [i as u8, 7, 42]).collect();
        let grid = PixelGrid::new(samples, 30, 10, 3).unwrap();

        let report = ImageReport::analyze(&grid, "clean.png", &AnalysisConfig::default()).unwrap();
        assert_eq!(report.decoded_message, None);
        assert!(!report.flagged);
        assert_eq!(report.suspicion, None);

        let stats = report.stats.unwrap();
        assert_eq!(stats.entropy, 0.0);
        assert_eq!(stats.sample_size, 300);
    }

    #[test]
    fn test_oversized_image_rejected_before_extraction() {
        let grid = PixelGrid::new(vec![0u8; 30], 10, 1, 3).unwrap();
        let mut config = AnalysisConfig::default();
        config.max_pixels = 9;

        assert!(matches!(
            ImageReport::analyze(&grid, "big.png", &config),
            Err(AnalysisError::UnsupportedImage {
                pixels: 10,
                max_pixels: 9,
            })
        ));
    }

    #[test]
    fn test_missing_channel_surfaces_error() {
        let grid = PixelGrid::new(vec![0u8; 100], 10, 10, 1).unwrap();
        let config = AnalysisConfig::default();

        assert!(matches!(
            ImageReport::analyze(&grid, "gray.png", &config),
            Err(AnalysisError::InvalidChannel { .. })
        ));
    }

    #[test]
    fn test_plane_survey_covers_all_planes() {
        let grid = grid_with_blue_payload(b"X", 32);
        let mut config = AnalysisConfig::default();
        config.bit_plane_export = true;

        let report = ImageReport::analyze(&grid, "x.png", &config).unwrap();
        assert_eq!(report.plane_stats.len(), 8);
        assert_eq!(report.plane_stats[0].plane, 0);

        // Plane 0 of the survey matches the headline statistics.
        assert_eq!(&report.plane_stats[0].stats, report.stats.as_ref().unwrap());
    }

    #[test]
    fn test_survey_disabled_by_default() {
        let grid = grid_with_blue_payload(b"X", 32);
        let report = ImageReport::analyze(&grid, "x.png", &AnalysisConfig::default()).unwrap();
        assert!(report.plane_stats.is_empty());
    }
}
