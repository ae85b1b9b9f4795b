//! Flattened bit sequence produced from a bit-plane.

/// An ordered sequence of single bits.
///
/// Produced by flattening a bit-plane in row-major order (left to
/// right, top to bottom); the length always equals width * height of
/// the source plane. Input to both the message decoder and the
/// statistical analyzer.
#[derive(Clone, PartialEq, Eq)]
pub struct BitStream {
    /// One byte per bit, each 0 or 1.
    bits: Vec<u8>,
}

impl BitStream {
    /// Creates a stream from raw bit values.
    ///
    /// Values are clamped to 0/1; anything nonzero counts as a set bit.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        let bits = bits.into_iter().map(|b| (b != 0) as u8).collect();
        Self { bits }
    }

    /// Returns the bit values (each 0 or 1).
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the stream holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Counts the set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Counts the clear bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Packs the stream into bytes, MSB-first within each byte.
    ///
    /// At most `max_bytes` are produced; trailing bits that do not
    /// fill a whole byte are dropped.
    pub fn to_bytes(&self, max_bytes: usize) -> Vec<u8> {
        self.bits
            .chunks_exact(8)
            .take(max_bytes)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
            .collect()
    }
}

impl std::fmt::Debug for BitStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitStream")
            .field("len", &self.bits.len())
            .field("ones", &self.count_ones())
            .finish()
    }
}
