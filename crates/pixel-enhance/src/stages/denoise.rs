//! Box blur smoothing.

use super::{interior, to_channel, Stage};
use crate::buffer::PixelBuffer;

/// Factor above which the denoiser is scheduled.
pub const DENOISE_THRESHOLD: f64 = 0.3;

/// Windowed-average smoothing over a `(2r+1) x (2r+1)` square.
///
/// `radius = floor(factor * 2)`, so for factors in `(0.3, 0.5)` the stage is
/// scheduled with radius 0 and leaves the raster unchanged. Blurring starts
/// at factor 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denoise {
    pub radius: u32,
}

impl Denoise {
    /// Stage parameters for `factor`, or `None` when the stage is gated off.
    pub fn for_factor(factor: f64) -> Option<Self> {
        if factor > DENOISE_THRESHOLD {
            Some(Self {
                radius: (factor * 2.0).floor() as u32,
            })
        } else {
            None
        }
    }
}

impl Stage for Denoise {
    fn name(&self) -> &'static str {
        "denoise"
    }

    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let mut output = input.clone();
        let r = self.radius as usize;
        if r == 0 {
            return output;
        }

        let (width, height) = input.dimensions();
        let side = 2 * r + 1;
        let window = (side * side) as f64;
        let src = input.as_bytes();

        for y in interior(height, r) {
            for x in interior(width, r) {
                let mut sums = [0u32; 3];
                for wy in y - r..=y + r {
                    for wx in x - r..=x + r {
                        let i = input.offset(wx, wy);
                        sums[0] += src[i] as u32;
                        sums[1] += src[i + 1] as u32;
                        sums[2] += src[i + 2] as u32;
                    }
                }
                let o = input.offset(x, y);
                let dst = output.bytes_mut();
                for (c, sum) in sums.iter().enumerate() {
                    dst[o + c] = to_channel(*sum as f64 / window);
                }
            }
        }

        output
    }
}
