//! LSB Steganography Detection Library
//!
//! Detects least-significant-bit steganography in raster images by
//! extracting bit-planes from a chosen color channel, attempting to
//! decode a hidden UTF-8 payload from the LSB stream, and scoring the
//! bit distribution with statistical randomness tests.
//!
//! # Architecture
//!
//! The pipeline follows an explicit data flow:
//!
//! ```text
//! image → extraction → decode
//!             ↓           ↓
//!         analysis  →  report → batch
//! ```
//!
//! # Design Principles
//!
//! - **Pure core**: the detector never touches a filesystem; decoded
//!   pixel grids are supplied through the [`PixelSource`] seam
//! - **Absent is not an error**: most images carry no payload, and a
//!   failed UTF-8 decode is the expected negative outcome
//! - **Partial failure**: a broken image is recorded in its report and
//!   never aborts a batch
//! - **Policy over ground truth**: flagging thresholds are tunable
//!   configuration, not hardcoded constants
//!
//! # Example
//!
//! ```
//! use stegdet::{AnalysisConfig, BatchAggregator, ImageReport, MemorySource, PixelGrid};
//!
//! // A 10x10 RGB image supplied by some decoding collaborator.
//! let samples = vec![0u8; 10 * 10 * 3];
//! let grid = PixelGrid::new(samples, 10, 10, 3).unwrap();
//!
//! // Single-image analysis surfaces errors directly.
//! let config = AnalysisConfig::default();
//! let report = ImageReport::analyze(&grid, "example.png", &config).unwrap();
//! assert!(report.decoded_message.is_none());
//! assert!(!report.flagged);
//!
//! // Batch analysis records per-image failures and keeps going.
//! let sources = vec![
//!     MemorySource::new("example.png", grid),
//!     MemorySource::unreadable("broken.png", "truncated file"),
//! ];
//! let result = BatchAggregator::new(config).run(sources);
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.failed(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod decode;
pub mod error;
pub mod extraction;
pub mod image;
pub mod report;

// Re-export commonly used types at crate root
pub use analysis::{BitStatistics, DetectionThresholds, Suspicion};
pub use config::{AnalysisConfig, FileConfig, OutputConfig};
pub use decode::MessageDecoder;
pub use error::AnalysisError;
pub use extraction::{BitPlane, BitStream, PLANE_COUNT};
pub use image::{Channel, ChannelPlane, MemorySource, PixelGrid, PixelSource};
pub use report::{BatchAggregator, BatchResult, ImageReport, PlaneStatistics};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
