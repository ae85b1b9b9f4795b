//! Bit-plane and bit-stream extraction.
//!
//! This module turns a channel plane into the binary views the
//! detector works with: a single bit-plane per bit position, and the
//! row-major bit-stream flattened from it.

mod bitplane;
mod bitstream;

pub use bitplane::{BitPlane, PLANE_COUNT};
pub use bitstream::BitStream;
