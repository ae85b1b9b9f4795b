//! Pixel data model and input seam.
//!
//! This module defines the decoded image representation the rest of
//! the pipeline consumes, the closed channel selector, and the
//! [`PixelSource`] trait through which collaborators (CLI file loader,
//! tests) supply images.

mod channel;
mod grid;
mod source;

pub use channel::Channel;
pub use grid::{ChannelPlane, GridError, PixelGrid};
pub use source::{MemorySource, PixelSource};
