//! Owned RGBA raster with validated dimensions.

use super::BufferError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// One channel of an RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// The three color channels, in storage order. Stages never touch alpha.
    pub const COLOR: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel within a pixel.
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// A row-major, 8-bit-per-channel RGBA raster.
///
/// The byte vector always holds exactly `width * height * 4` bytes. Values
/// are `u8`, so the buffer itself never clamps; every stage converts its
/// real-valued results before writing.
///
/// # Example
///
/// ```
/// use pixel_enhance::{Channel, PixelBuffer};
///
/// let mut buffer = PixelBuffer::filled(2, 2, [128, 128, 128, 255]);
/// buffer.set(1, 0, Channel::Red, 200).unwrap();
///
/// assert_eq!(buffer.get(1, 0).unwrap(), [200, 128, 128, 255]);
/// assert!(buffer.get(2, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Byte length of a `width x height` RGBA raster, or `None` on overflow.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

impl PixelBuffer {
    /// Wrap decoded RGBA bytes.
    ///
    /// Returns [`BufferError::LengthMismatch`] unless
    /// `pixels.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        match byte_len(width, height) {
            Some(len) if len == pixels.len() => Ok(Self {
                width,
                height,
                pixels,
            }),
            _ => Err(BufferError::LengthMismatch {
                width,
                height,
                actual: pixels.len(),
            }),
        }
    }

    /// Create a raster with every pixel set to `rgba`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = byte_len(width, height).expect("raster dimensions overflow usize");
        let mut pixels = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / CHANNELS
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer, returning its RGBA bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Read the pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn get(&self, x: u32, y: u32) -> Result<[u8; 4], BufferError> {
        let i = self.checked_offset(x, y)?;
        Ok([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Write one channel of the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: u8) -> Result<(), BufferError> {
        let i = self.checked_offset(x, y)?;
        self.pixels[i + channel.offset()] = value;
        Ok(())
    }

    fn checked_offset(&self, x: u32, y: u32) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(x as usize, y as usize))
    }

    /// Byte offset of pixel `(x, y)`. Callers guarantee the coordinate is
    /// inside the raster.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * CHANNELS
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
