//! Max-luminance accumulation.
//!
//! The numerically dense core of the compositor. Each valid frame is
//! reduced into a single running composite: per pixel, the RGB triple
//! with the highest BT.601 luma seen so far wins. The selection is
//! driven by one derived luma scalar applied identically to all three
//! channels; channels are never compared independently.

mod luma;
mod repair;

pub use luma::{luma, LumaPlane, LUMA_WEIGHTS};
pub use repair::{
    in_band, repair_defect_band, RepairReport, BAND_HIGH, BAND_LOW, GLOBAL_THRESHOLD,
    LOCAL_THRESHOLD, WINDOW_HALF_WIDTH,
};

use crate::frame::Frame;
use image::RgbImage;

/// Running per-pixel maximum-luminance composite.
///
/// Channels are `f32`, zero initialized. The accumulator is the single
/// owned mutable state of a composite run; nothing else references it
/// while frames merge, and finalization consumes it by value.
pub struct Accumulator {
    /// Interleaved RGB channel data (len = width * height * 3).
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl Accumulator {
    /// Creates a zeroed accumulator of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0.0; (width as usize) * (height as usize) * 3],
            width,
            height,
        }
    }

    /// Returns the accumulator width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the accumulator height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Merges one frame into the running composite.
    ///
    /// `frame_luma` is the frame's (post-repair) luma plane; the
    /// accumulator side is recomputed from current state, never cached.
    /// Ties keep the accumulator's existing triple, so earlier frames
    /// win exact-luma ties.
    ///
    /// # Panics
    ///
    /// Panics if the frame or luma plane dimensions differ from the
    /// accumulator's. Callers validate dimensions at load time.
    pub fn merge(&mut self, frame: &Frame, frame_luma: &LumaPlane) {
        assert_eq!((frame.width(), frame.height()), (self.width, self.height));
        assert_eq!(
            (frame_luma.width(), frame_luma.height()),
            (self.width, self.height)
        );

        let pixels = frame.pixels();
        for (i, &l_frame) in frame_luma.values().iter().enumerate() {
            let base = i * 3;
            let acc = &mut self.data[base..base + 3];
            let l_acc = luma(acc[0], acc[1], acc[2]);

            // One mask per pixel, applied to all three channels.
            if l_frame > l_acc {
                acc[0] = pixels[base] as f32;
                acc[1] = pixels[base + 1] as f32;
                acc[2] = pixels[base + 2] as f32;
            }
        }
    }

    /// Finalizes the composite into an 8-bit image.
    ///
    /// Inputs and luma weights keep channel values in [0, 255], but the
    /// conversion clamps anyway before truncating.
    pub fn finish(self) -> RgbImage {
        let bytes: Vec<u8> = self
            .data
            .into_iter()
            .map(|v| v.clamp(0.0, 255.0) as u8)
            .collect();

        // Buffer length is width * height * 3 by construction.
        RgbImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

impl std::fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accumulator")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
