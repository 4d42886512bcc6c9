//! Frame decoding and validation.
//!
//! This module turns discovered candidate files into validated pixel
//! buffers. A frame only enters the compositor after a full decode and
//! a dimension check against the request; anything else is skipped.

mod loader;

pub use loader::{load_frame, FrameError};

use crate::discovery::DiscoverySlot;
use std::path::PathBuf;

/// A single decoded frame from the archive.
///
/// Holds interleaved RGB8 pixel data along with the source path and the
/// discovery slot it was found at. The slot stands in for a capture
/// timestamp; frame content is never consulted for ordering.
#[derive(Clone)]
pub struct Frame {
    /// Interleaved RGB8 pixel data (len = width * height * 3).
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Source file the frame was decoded from.
    path: PathBuf,
    /// Position in the discovery scan order.
    slot: DiscoverySlot,
}

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        path: PathBuf,
        slot: DiscoverySlot,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            path,
            slot,
        }
    }

    /// Returns the interleaved RGB8 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the source file path.
    #[inline]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Returns the discovery slot.
    #[inline]
    pub fn slot(&self) -> DiscoverySlot {
        self.slot
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count() * 3
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("path", &self.path)
            .field("slot", &self.slot)
            .finish()
    }
}
