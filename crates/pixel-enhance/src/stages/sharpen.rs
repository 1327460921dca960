//! Unsharp-mask convolution.

use super::{interior, to_channel, Stage};
use crate::buffer::PixelBuffer;

/// Factor above which the sharpener is scheduled.
pub const SHARPEN_THRESHOLD: f64 = 0.4;

/// 3x3 sharpening convolution with kernel
///
/// ```text
///  0  -1   0
/// -1  c   -1
///  0  -1   0      c = 5 + 2 * factor
/// ```
///
/// The kernel sums to `1 + 2 * factor`, not 1, so flat regions brighten as
/// well as edges sharpening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpen {
    pub center_weight: f64,
}

impl Sharpen {
    pub fn for_factor(factor: f64) -> Option<Self> {
        if factor > SHARPEN_THRESHOLD {
            Some(Self {
                center_weight: 5.0 + factor * 2.0,
            })
        } else {
            None
        }
    }

    /// The kernel in row-major order.
    pub fn kernel(&self) -> [f64; 9] {
        [
            0.0,
            -1.0,
            0.0,
            -1.0,
            self.center_weight,
            -1.0,
            0.0,
            -1.0,
            0.0,
        ]
    }
}

impl Stage for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        let mut output = input.clone();
        let (width, height) = input.dimensions();
        let kernel = self.kernel();
        let src = input.as_bytes();

        for y in interior(height, 1) {
            for x in interior(width, 1) {
                let mut sums = [0.0f64; 3];
                for (k, weight) in kernel.iter().enumerate() {
                    let i = input.offset(x + k % 3 - 1, y + k / 3 - 1);
                    for (c, sum) in sums.iter_mut().enumerate() {
                        *sum += src[i + c] as f64 * weight;
                    }
                }
                let o = input.offset(x, y);
                let dst = output.bytes_mut();
                for (c, sum) in sums.iter().enumerate() {
                    dst[o + c] = to_channel(*sum);
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{alphas, border_equal, gradient};

    #[test]
    fn test_gating() {
        assert_eq!(Sharpen::for_factor(0.4), None);
        assert!(Sharpen::for_factor(0.41).is_some());
        assert_eq!(
            Sharpen::for_factor(1.0),
            Some(Sharpen { center_weight: 7.0 })
        );
    }

    #[test]
    fn test_kernel_layout() {
        let kernel = Sharpen { center_weight: 6.0 }.kernel();
        assert_eq!(kernel, [0.0, -1.0, 0.0, -1.0, 6.0, -1.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_flat_region_scaled_by_kernel_sum() {
        // Kernel sum 3 at center 7: interior 40 -> 120, border stays 40
        let input = PixelBuffer::filled(4, 4, [40, 40, 40, 255]);
        let output = Sharpen { center_weight: 7.0 }.apply(&input);
        assert_eq!(output.get(1, 1).unwrap(), [120, 120, 120, 255]);
        assert_eq!(output.get(2, 2).unwrap(), [120, 120, 120, 255]);
        assert_eq!(output.get(0, 1).unwrap(), [40, 40, 40, 255]);
    }

    #[test]
    fn test_clamps_both_ends() {
        // Bright centre surrounded by dark pixels, and vice versa
        let mut pixels = vec![0u8; 9 * 4];
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[250, 0, 250, 255]);
        }
        pixels[16..20].copy_from_slice(&[0, 250, 10, 255]);
        let input = PixelBuffer::new(3, 3, pixels).unwrap();
        let output = Sharpen { center_weight: 6.0 }.apply(&input);
        // R: 0*6 - 4*250 -> clamps to 0; G: 250*6 - 0 -> clamps to 255
        // B: 10*6 - 4*250 -> clamps to 0
        assert_eq!(output.get(1, 1).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_fractional_center_weight_rounds() {
        // center 5.82 at factor 0.41; 100 * 5.82 - 4 * 100 = 182
        let input = PixelBuffer::filled(3, 3, [100, 100, 100, 255]);
        let output = Sharpen::for_factor(0.41).unwrap().apply(&input);
        assert_eq!(output.get(1, 1).unwrap(), [182, 182, 182, 255]);
    }

    #[test]
    fn test_border_and_alpha_untouched() {
        let input = gradient(8, 6);
        let output = Sharpen { center_weight: 6.5 }.apply(&input);
        assert!(border_equal(&input, &output, 1));
        assert_eq!(alphas(&input), alphas(&output));
    }

    #[test]
    fn test_degenerate_sizes() {
        for (w, h) in [(1, 1), (2, 5), (5, 2), (0, 0)] {
            let input = PixelBuffer::filled(w, h, [9, 9, 9, 9]);
            assert_eq!(Sharpen { center_weight: 7.0 }.apply(&input), input);
        }
    }
}
