//! Decoded pixel data supplied by the image-loading collaborator.

use super::Channel;
use crate::error::AnalysisError;
use thiserror::Error;

/// Errors raised when constructing a [`PixelGrid`] from raw samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Width, height, or channel count of zero.
    #[error("empty dimensions: {width}x{height} with {channels} channels")]
    EmptyDimensions {
        /// Claimed width.
        width: u32,
        /// Claimed height.
        height: u32,
        /// Claimed channel count.
        channels: u8,
    },

    /// Sample buffer length does not match the claimed dimensions.
    #[error("sample buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Required length (width * height * channels).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

/// An immutable, decoded pixel grid.
///
/// Samples are stored row-major with interleaved channels, the layout
/// every common codec hands out for 8-bit RGB. The core never decodes
/// image files itself; a collaborator builds one of these and passes
/// it in.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    /// Row-major interleaved samples, `width * height * channels` bytes.
    samples: Vec<u8>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Channels per pixel (3 for RGB, 1 for grayscale).
    channels: u8,
}

impl PixelGrid {
    /// Creates a grid from interleaved samples, validating the layout.
    pub fn new(samples: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, GridError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(GridError::EmptyDimensions {
                width,
                height,
                channels,
            });
        }

        let expected = (width as usize) * (height as usize) * (channels as usize);
        if samples.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            samples,
            width,
            height,
            channels,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Extracts one channel's samples as a fresh plane.
    ///
    /// Fails with [`AnalysisError::InvalidChannel`] when the channel
    /// index is not covered by this grid (e.g. blue on grayscale).
    pub fn channel_plane(&self, channel: Channel) -> Result<ChannelPlane, AnalysisError> {
        let idx = channel.index();
        if idx >= self.channels {
            return Err(AnalysisError::InvalidChannel {
                channel,
                available: self.channels,
            });
        }

        let stride = self.channels as usize;
        let samples: Vec<u8> = self.samples[idx as usize..]
            .iter()
            .step_by(stride)
            .copied()
            .collect();

        Ok(ChannelPlane {
            samples,
            width: self.width,
            height: self.height,
        })
    }
}

/// A single channel's samples, same dimensions as the source grid.
#[derive(Debug, Clone)]
pub struct ChannelPlane {
    samples: Vec<u8>,
    width: u32,
    height: u32,
}

impl ChannelPlane {
    /// Returns the raw channel samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns the plane width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the plane height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 RGB grid with distinct per-channel values.
    fn rgb_2x2() -> PixelGrid {
        #[rustfmt::skip]
        let samples = vec![
            10, 20, 30,   11, 21, 31,
            12, 22, 32,   13, 23, 33,
        ];
        PixelGrid::new(samples, 2, 2, 3).unwrap()
    }

    #[test]
    fn test_buffer_size_validation() {
        assert!(matches!(
            PixelGrid::new(vec![0u8; 5], 2, 2, 3),
            Err(GridError::BufferSizeMismatch {
                expected: 12,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelGrid::new(vec![], 0, 4, 3),
            Err(GridError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn test_channel_plane_selects_interleaved_samples() {
        let grid = rgb_2x2();

        let red = grid.channel_plane(Channel::Red).unwrap();
        assert_eq!(red.samples(), &[10, 11, 12, 13]);

        let blue = grid.channel_plane(Channel::Blue).unwrap();
        assert_eq!(blue.samples(), &[30, 31, 32, 33]);
        assert_eq!(blue.width(), 2);
        assert_eq!(blue.height(), 2);
    }

    #[test]
    fn test_channel_out_of_range_on_grayscale() {
        let grid = PixelGrid::new(vec![0u8; 4], 2, 2, 1).unwrap();
        assert!(matches!(
            grid.channel_plane(Channel::Green),
            Err(AnalysisError::InvalidChannel {
                channel: Channel::Green,
                available: 1,
            })
        ));
    }
}
