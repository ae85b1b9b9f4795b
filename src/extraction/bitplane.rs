//! Bit-plane derivation from channel samples.

use super::BitStream;
use crate::error::AnalysisError;
use crate::image::ChannelPlane;

/// Number of bit-planes in an 8-bit sample.
pub const PLANE_COUNT: u8 = 8;

/// A binary plane holding one bit position across a whole channel.
///
/// Plane 0 is the least significant bit, the classic hiding spot;
/// planes are independent of each other and each extraction allocates
/// a fresh plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPlane {
    /// Row-major cells, each 0 or 1.
    cells: Vec<u8>,
    /// Plane width in pixels.
    width: u32,
    /// Plane height in pixels.
    height: u32,
    /// Which bit position this plane was taken from (0 = LSB).
    bit_index: u8,
}

impl BitPlane {
    /// Extracts the plane at `bit_index` from a channel.
    ///
    /// Each cell is `(sample >> bit_index) & 1`. Fails with
    /// [`AnalysisError::InvalidBitIndex`] outside 0..=7.
    pub fn extract(plane: &ChannelPlane, bit_index: u8) -> Result<Self, AnalysisError> {
        if bit_index >= PLANE_COUNT {
            return Err(AnalysisError::InvalidBitIndex(bit_index));
        }

        let cells = plane
            .samples()
            .iter()
            .map(|&sample| (sample >> bit_index) & 1)
            .collect();

        Ok(Self {
            cells,
            width: plane.width(),
            height: plane.height(),
            bit_index,
        })
    }

    /// Returns the cells in row-major order (each 0 or 1).
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
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

    /// Returns the bit position this plane was taken from.
    #[inline]
    pub fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// Flattens the plane into a bit-stream, row-major.
    pub fn to_stream(&self) -> BitStream {
        BitStream::from_bits(self.cells.clone())
    }

    /// Renders the plane as grayscale bytes (0 or 255 per cell).
    ///
    /// Used by the visualization exporter; hidden patterns often show
    /// up as visible structure in the rendered LSB plane.
    pub fn to_grayscale(&self) -> Vec<u8> {
        self.cells.iter().map(|&bit| bit * 255).collect()
    }
}
