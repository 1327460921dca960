//! Gradient-based local contrast boost.

use super::{interior, to_channel, Stage};
use crate::buffer::PixelBuffer;

/// Factor above which edge enhancement is scheduled.
pub const EDGE_THRESHOLD: f64 = 0.6;

/// Adds `gradient * strength * 0.1` to each interior color channel, where
/// `gradient = |right - left| + |bottom - top|` on the same channel.
///
/// The enhancement is never negative, so edges only brighten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEnhance {
    pub strength: f64,
}

impl EdgeEnhance {
    pub fn for_factor(factor: f64) -> Option<Self> {
        if factor > EDGE_THRESHOLD {
            Some(Self {
                strength: (factor - EDGE_THRESHOLD) * 2.5,
            })
        } else {
            None
        }
    }
}

impl Stage for EdgeEnhance {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let mut output = input.clone();
        let (width, height) = input.dimensions();
        let src = input.as_bytes();

        for y in interior(height, 1) {
            for x in interior(width, 1) {
                let o = input.offset(x, y);
                let left = input.offset(x - 1, y);
                let right = input.offset(x + 1, y);
                let top = input.offset(x, y - 1);
                let bottom = input.offset(x, y + 1);
                let dst = output.bytes_mut();
                for c in 0..3 {
                    let horizontal = (src[right + c] as i32 - src[left + c] as i32).abs();
                    let vertical = (src[bottom + c] as i32 - src[top + c] as i32).abs();
                    let gradient = (horizontal + vertical) as f64;
                    let enhancement = gradient * self.strength * 0.1;
                    dst[o + c] = to_channel(src[o + c] as f64 + enhancement);
                }
            }
        }

        output
    }
}
