//! Error types for pixel buffer construction and access.

use std::fmt;

/// Error type for [`PixelBuffer`](super::PixelBuffer) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Byte length does not equal `width * height * 4`, or the product
    /// overflows `usize`.
    LengthMismatch {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Number of bytes supplied
        actual: usize,
    },
    /// Coordinate outside the raster.
    IndexOutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LengthMismatch {
                width,
                height,
                actual,
            } => write!(
                f,
                "pixel data length {} does not match {}x{} RGBA raster",
                actual, width, height
            ),
            BufferError::IndexOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pixel ({}, {}) out of bounds for {}x{} raster",
                x, y, width, height
            ),
        }
    }
}

impl std::error::Error for BufferError {}
