//! Pixel source abstraction for batch input.
//!
//! The detection core never touches a filesystem. Anything that can
//! hand over a decoded [`PixelGrid`] — a file loader, a network blob,
//! a test fixture — implements [`PixelSource`] and reports its own
//! failures as [`AnalysisError::UnreadableInput`].

use super::PixelGrid;
use crate::error::AnalysisError;

/// Trait for suppliers of decoded pixel data.
///
/// This abstraction keeps codec concerns (file formats, I/O, decode
/// timeouts) out of the analysis core and lets tests feed in-memory
/// grids through the same batch path as real files.
pub trait PixelSource {
    /// Opaque identifier used only for report labeling (usually a path).
    fn identifier(&self) -> &str;

    /// Produces the decoded pixel grid.
    ///
    /// Implementations map their own decode failures to
    /// [`AnalysisError::UnreadableInput`].
    fn load(&self) -> Result<PixelGrid, AnalysisError>;
}

/// In-memory pixel source for tests and embedding.
#[derive(Debug, Clone)]
pub struct MemorySource {
    identifier: String,
    grid: Result<PixelGrid, AnalysisError>,
}

impl MemorySource {
    /// Creates a source that yields the given grid.
    pub fn new(identifier: impl Into<String>, grid: PixelGrid) -> Self {
        Self {
            identifier: identifier.into(),
            grid: Ok(grid),
        }
    }

    /// Creates a source that fails to load, for exercising the
    /// partial-failure path.
    pub fn unreadable(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            grid: Err(AnalysisError::UnreadableInput(reason.into())),
        }
    }
}

impl PixelSource for MemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn load(&self) -> Result<PixelGrid, AnalysisError> {
        self.grid.clone()
    }
}
