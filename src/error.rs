//! Per-image analysis errors.
//!
//! Every error here is scoped to a single image. Batch processing
//! records them in the affected report and moves on; only the
//! single-image API propagates them to the caller.

use crate::image::Channel;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while analyzing a single image.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum AnalysisError {
    /// The requested channel is not present in the pixel data
    /// (e.g. blue requested on a grayscale image).
    #[error("channel {channel} not present in {available}-channel image")]
    InvalidChannel {
        /// The channel that was requested.
        channel: Channel,
        /// Number of channels the image actually has.
        available: u8,
    },

    /// Bit index outside the valid 0..=7 range for 8-bit samples.
    #[error("bit index {0} outside valid range 0..=7")]
    InvalidBitIndex(u8),

    /// Image exceeds the configured pixel-count safeguard.
    #[error("image has {pixels} pixels, exceeding the limit of {max_pixels}")]
    UnsupportedImage {
        /// Total pixel count of the offending image.
        pixels: u64,
        /// Configured maximum.
        max_pixels: u64,
    },

    /// The decoding collaborator could not produce a pixel grid.
    #[error("unreadable input: {0}")]
    UnreadableInput(String),
}

impl AnalysisError {
    /// Short machine-readable kind name, used for report columns.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidChannel { .. } => "invalid_channel",
            AnalysisError::InvalidBitIndex(_) => "invalid_bit_index",
            AnalysisError::UnsupportedImage { .. } => "unsupported_image",
            AnalysisError::UnreadableInput(_) => "unreadable_input",
        }
    }
}
