//! BT.601 luminance derivation.
//!
//! All brightness comparisons in the compositor are driven by a single
//! derived luma scalar per pixel, never by per-channel values. The plane
//! is recomputed wherever a comparison is needed and is never persisted
//! across merges.

/// ITU-R BT.601 luma weights for R, G, B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Computes the BT.601 luma of one RGB triple.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// A per-pixel luminance plane derived from an RGB buffer.
///
/// Row-major, one `f32` per pixel. Values stay within [0, 255] for
/// 8-bit input because the luma weights sum to 1.
#[derive(Clone)]
pub struct LumaPlane {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl LumaPlane {
    /// Derives a luma plane from an interleaved RGB8 buffer.
    ///
    /// The buffer length must equal `width * height * 3`.
    pub fn from_rgb8(pixels: &[u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize) * 3);

        let values = pixels
            .chunks_exact(3)
            .map(|px| luma(px[0] as f32, px[1] as f32, px[2] as f32))
            .collect();

        Self {
            values,
            width,
            height,
        }
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

    /// Returns the luma values in row-major order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the luma at (row, col).
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> f32 {
        self.values[(row as usize) * (self.width as usize) + (col as usize)]
    }

    /// Forces the luma at (row, col) to zero.
    ///
    /// Used by defect repair to exclude a pixel from winning the
    /// max-selection for this frame.
    #[inline]
    pub(crate) fn zero(&mut self, row: u32, col: u32) {
        self.values[(row as usize) * (self.width as usize) + (col as usize)] = 0.0;
    }
}

impl std::fmt::Debug for LumaPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LumaPlane")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f32 = LUMA_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gray_luma_is_gray_level() {
        // Equal channels: luma equals the channel value
        assert!((luma(128.0, 128.0, 128.0) - 128.0).abs() < 1e-3);
        assert!((luma(0.0, 0.0, 0.0)).abs() < 1e-6);
        assert!((luma(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_green_dominates() {
        let g = luma(0.0, 200.0, 0.0);
        let r = luma(200.0, 0.0, 0.0);
        let b = luma(0.0, 0.0, 200.0);
        assert!(g > r && r > b);
    }

    #[test]
    fn test_plane_indexing() {
        // 2x2 image: one bright pixel at (1, 1)
        let mut pixels = vec![0u8; 12];
        pixels[9] = 255;
        pixels[10] = 255;
        pixels[11] = 255;

        let plane = LumaPlane::from_rgb8(&pixels, 2, 2);
        assert_eq!(plane.values().len(), 4);
        assert!((plane.get(1, 1) - 255.0).abs() < 1e-3);
        assert_eq!(plane.get(0, 0), 0.0);
    }

    #[test]
    fn test_zero_excludes_pixel() {
        let pixels = vec![200u8; 12];
        let mut plane = LumaPlane::from_rgb8(&pixels, 2, 2);

        plane.zero(0, 1);
        assert_eq!(plane.get(0, 1), 0.0);
        assert!(plane.get(0, 0) > 0.0);
    }
}
