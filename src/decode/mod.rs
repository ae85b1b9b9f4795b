//! LSB payload decoding.
//!
//! Attempts to read a hidden UTF-8 message out of a bit-stream. A
//! failed decode is the normal outcome for clean images and is never
//! reported as an error.

use crate::extraction::BitStream;

/// Decodes candidate text payloads from LSB bit-streams.
///
/// Bits are grouped MSB-first into bytes, scanning up to a 0x00
/// sentinel or the configured byte limit, whichever comes first. The
/// limit bounds work on large images; callers that need a full-image
/// scan must raise it explicitly.
#[derive(Debug, Clone)]
pub struct MessageDecoder {
    /// Maximum number of bytes to reconstruct from the stream.
    scan_limit: usize,
    /// Minimum share of printable ASCII required to accept a payload.
    min_printable_ratio: f64,
}

impl MessageDecoder {
    /// Creates a decoder with the given scan limit in bytes.
    ///
    /// The printable-ratio filter defaults to 0.8: valid UTF-8 that is
    /// mostly non-printable is treated as noise, not a payload.
    pub fn new(scan_limit: usize) -> Self {
        Self {
            scan_limit,
            min_printable_ratio: 0.8,
        }
    }

    /// Creates a decoder with an explicit printable-ratio filter.
    ///
    /// A ratio of 0.0 disables the filter; 1.0 demands pure printable
    /// ASCII. Values are clamped to [0, 1].
    pub fn with_printable_ratio(scan_limit: usize, min_printable_ratio: f64) -> Self {
        Self {
            scan_limit,
            min_printable_ratio: min_printable_ratio.clamp(0.0, 1.0),
        }
    }

    /// Attempts to recover a hidden message from the stream.
    ///
    /// Returns `None` for streams shorter than one byte, for byte
    /// sequences that are empty or invalid UTF-8, and for text below
    /// the printable-ratio filter. None of these are errors; they are
    /// the expected outcome for images without a payload.
    pub fn decode(&self, stream: &BitStream) -> Option<String> {
        if stream.len() < 8 {
            return None;
        }

        let mut bytes = stream.to_bytes(self.scan_limit);
        if let Some(end) = bytes.iter().position(|&b| b == 0x00) {
            bytes.truncate(end);
        }
        if bytes.is_empty() {
            return None;
        }

        let text = String::from_utf8(bytes).ok()?;
        if self.printable_ratio(&text) < self.min_printable_ratio {
            tracing::trace!(len = text.len(), "candidate payload rejected as non-printable");
            return None;
        }

        Some(text)
    }

    /// Share of characters in the printable ASCII range (0x20..=0x7E).
    fn printable_ratio(&self, text: &str) -> f64 {
        let total = text.chars().count();
        if total == 0 {
            return 0.0;
        }
        let printable = text.chars().filter(|c| (' '..='~').contains(c)).count();
        printable as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a stream spelling out `bytes` MSB-first.
    fn stream_of(bytes: &[u8]) -> BitStream {
        let bits = bytes
            .iter()
            .flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1))
            .collect();
        BitStream::from_bits(bits)
    }

    #[test]
    fn test_decodes_sentinel_terminated_text() {
        let decoder = MessageDecoder::new(1024);
        let stream = stream_of(b"HI\x00\xFF\xFF");
        assert_eq!(decoder.decode(&stream), Some("HI".to_string()));
    }

    #[test]
    fn test_scan_limit_truncates() {
        let decoder = MessageDecoder::new(5);
        let stream = stream_of(b"HELLO WORLD");
        assert_eq!(decoder.decode(&stream), Some("HELLO".to_string()));
    }

    #[test]
    fn test_sub_byte_stream_yields_nothing() {
        let decoder = MessageDecoder::new(1024);
        let stream = BitStream::from_bits(vec![1, 0, 1, 1]);
        assert_eq!(decoder.decode(&stream), None);
    }

    #[test]
    fn test_leading_sentinel_yields_nothing() {
        let decoder = MessageDecoder::new(1024);
        let stream = stream_of(b"\x00HI");
        assert_eq!(decoder.decode(&stream), None);
    }

    #[test]
    fn test_invalid_utf8_yields_nothing() {
        let decoder = MessageDecoder::new(1024);
        // 0xC3 starts a two-byte sequence that never completes.
        let stream = stream_of(&[0xC3, 0x28, 0x00]);
        assert_eq!(decoder.decode(&stream), None);
    }

    #[test]
    fn test_printable_filter_rejects_control_noise() {
        let noisy = [0x01, 0x02, 0x03, 0x04, b'A', 0x00];
        let stream = stream_of(&noisy);

        let strict = MessageDecoder::new(1024);
        assert_eq!(strict.decode(&stream), None);

        let lax = MessageDecoder::with_printable_ratio(1024, 0.0);
        assert!(lax.decode(&stream).is_some());
    }

    #[test]
    fn test_multibyte_utf8_accepted_when_ratio_allows() {
        let decoder = MessageDecoder::with_printable_ratio(1024, 0.5);
        let stream = stream_of("héllo\u{0}".as_bytes());
        assert_eq!(decoder.decode(&stream), Some("héllo".to_string()));
    }
}
