//! Brightness and contrast.

use super::{to_channel, Stage};
use crate::buffer::{PixelBuffer, CHANNELS};

const MIDPOINT: f64 = 128.0;

/// Linear tonal adjustment, applied per color channel:
/// `v = ((v * brightness) - 128) * contrast + 128`.
///
/// Brightness scaling happens before contrast re-centering. At factor 0 both
/// multipliers are 1 and the stage is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tonal {
    pub brightness: f64,
    pub contrast: f64,
}

impl Tonal {
    pub fn for_factor(factor: f64) -> Self {
        Self {
            brightness: 1.0 + factor * 0.35,
            contrast: 1.0 + factor * 0.6,
        }
    }

    #[inline]
    fn adjust(&self, value: u8) -> u8 {
        let v = value as f64 * self.brightness;
        to_channel((v - MIDPOINT) * self.contrast + MIDPOINT)
    }
}

impl Stage for Tonal {
    fn name(&self) -> &'static str {
        "tonal"
    }

    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let mut output = input.clone();
        if self.brightness == 1.0 && self.contrast == 1.0 {
            return output;
        }
        for px in output.bytes_mut().chunks_exact_mut(CHANNELS) {
            for v in &mut px[..3] {
                *v = self.adjust(*v);
            }
        }
        output
    }
}
