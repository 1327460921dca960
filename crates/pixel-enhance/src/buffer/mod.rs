//! The RGBA raster that every stage reads and produces.

mod error;
mod pixel_buffer;

pub use error::BufferError;
pub use pixel_buffer::{Channel, PixelBuffer, CHANNELS};
