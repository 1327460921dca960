//! Enhancement stages.
//!
//! Each stage is a pure function from one [`PixelBuffer`] to a new buffer of
//! identical dimensions, implemented behind the [`Stage`] trait:
//!
//! - [`Denoise`]: box blur over a square window
//! - [`Sharpen`]: 3x3 unsharp-mask convolution
//! - [`Tonal`]: brightness then contrast
//! - [`Vibrance`]: saturation weighted toward near-gray pixels
//! - [`EdgeEnhance`]: gradient-driven local contrast boost
//!
//! # Read/write discipline
//!
//! Neighborhood stages (denoise, sharpen, edge) read only from the input
//! buffer and write into a copy of it, so no pixel ever observes an
//! already-processed neighbor. Pixels too close to the edge for a full
//! neighborhood are copied through untouched.
//!
//! Alpha is never written.
//!
//! # Channel conversion
//!
//! All stages convert real-valued results with [`to_channel`]: clamp to
//! `[0, 255]`, then round half to even.

mod denoise;
mod edge;
mod sharpen;
mod tonal;
mod vibrance;

use std::ops::Range;

use crate::buffer::PixelBuffer;

pub use denoise::Denoise;
pub use edge::EdgeEnhance;
pub use sharpen::Sharpen;
pub use tonal::Tonal;
pub use vibrance::Vibrance;

/// A single enhancement pass over a raster.
pub trait Stage {
    /// Short stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Produce the stage output. The input is never modified, and the output
    /// has the input's dimensions and alpha values.
    fn apply(&self, input: &PixelBuffer) -> PixelBuffer;
}

/// Convert a computed channel value to a byte: clamp, then round half to even.
#[inline]
pub fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Coordinates at least `margin` away from both ends of `0..len`.
#[inline]
fn interior(len: u32, margin: usize) -> Range<usize> {
    margin..(len as usize).saturating_sub(margin)
}
