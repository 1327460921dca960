//! Unified error type for the pixel-enhance public API.

use crate::buffer::BufferError;
use crate::level::LevelError;
use std::fmt;

/// Wraps every error the crate can produce, for `?` propagation in callers.
///
/// ```
/// use pixel_enhance::{EnhanceError, EnhancementLevel, PixelBuffer};
///
/// fn load(bytes: Vec<u8>, level: u8) -> Result<(PixelBuffer, EnhancementLevel), EnhanceError> {
///     Ok((PixelBuffer::new(1, 1, bytes)?, EnhancementLevel::new(level)?))
/// }
///
/// assert!(load(vec![0; 4], 50).is_ok());
/// assert!(load(vec![0; 3], 50).is_err());
/// assert!(load(vec![0; 4], 150).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceError {
    Buffer(BufferError),
    Level(LevelError),
}

impl fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhanceError::Buffer(err) => write!(f, "buffer error: {}", err),
            EnhanceError::Level(err) => write!(f, "level error: {}", err),
        }
    }
}

impl std::error::Error for EnhanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnhanceError::Buffer(err) => Some(err),
            EnhanceError::Level(err) => Some(err),
        }
    }
}

impl From<BufferError> for EnhanceError {
    fn from(err: BufferError) -> Self {
        EnhanceError::Buffer(err)
    }
}

impl From<LevelError> for EnhanceError {
    fn from(err: LevelError) -> Self {
        EnhanceError::Level(err)
    }
}
