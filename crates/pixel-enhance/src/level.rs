//! The single intensity knob driving every stage.

use std::fmt;

/// Error for levels outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange(i64),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::OutOfRange(value) => {
                write!(f, "enhancement level {} outside 0..=100", value)
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Enhancement intensity in `0..=100`.
///
/// Stages never see the level directly; they derive their parameters from
/// [`factor()`](Self::factor), which is `level / 100`.
///
/// ```
/// use pixel_enhance::EnhancementLevel;
///
/// let level = EnhancementLevel::new(60).unwrap();
/// assert_eq!(level.factor(), 0.6);
/// assert!(EnhancementLevel::new(101).is_err());
/// assert_eq!(EnhancementLevel::clamped(250).get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EnhancementLevel(u8);

impl EnhancementLevel {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// `const` constructor, saturating at 100.
    pub const fn saturating(level: u8) -> Self {
        if level > 100 {
            Self(100)
        } else {
            Self(level)
        }
    }

    pub fn new(level: u8) -> Result<Self, LevelError> {
        if level > 100 {
            return Err(LevelError::OutOfRange(level as i64));
        }
        Ok(Self(level))
    }

    /// Clamp any integer into `0..=100`.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(0, 100) as u8)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// `level / 100` as a float in `[0, 1]`.
    #[inline]
    pub fn factor(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<i64> for EnhancementLevel {
    type Error = LevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(0..=100).contains(&value) {
            return Err(LevelError::OutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl fmt::Display for EnhancementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
