//! Vibrance: saturation boost weighted toward near-gray pixels.

use super::{to_channel, Stage};
use crate::buffer::{PixelBuffer, CHANNELS};

/// Rec. 601 luma weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Per-pixel saturation around the pixel's luma.
///
/// The boost shrinks as the pixel's chroma (`max - min` of its channels)
/// grows: a gray pixel receives the full `saturation`, a fully saturated one
/// receives none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vibrance {
    pub saturation: f64,
}

impl Vibrance {
    pub fn for_factor(factor: f64) -> Self {
        Self {
            saturation: 1.0 + factor * 0.5,
        }
    }

    /// Effective saturation for a pixel with the given chroma.
    #[inline]
    pub fn adjusted_saturation(&self, chroma: u8) -> f64 {
        let vibrance = 1.0 - chroma as f64 / 255.0;
        1.0 + (self.saturation - 1.0) * vibrance
    }

    fn adjust(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb;
        let luma = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
        let chroma = r.max(g).max(b) - r.min(g).min(b);
        let sat = self.adjusted_saturation(chroma);
        rgb.map(|v| to_channel(luma + (v as f64 - luma) * sat))
    }
}

impl Stage for Vibrance {
    fn name(&self) -> &'static str {
        "vibrance"
    }

    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let mut output = input.clone();
        if self.saturation == 1.0 {
            return output;
        }
        for px in output.bytes_mut().chunks_exact_mut(CHANNELS) {
            let adjusted = self.adjust([px[0], px[1], px[2]]);
            px[..3].copy_from_slice(&adjusted);
        }
        output
    }
}
