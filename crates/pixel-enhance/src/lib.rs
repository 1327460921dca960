//! pixel-enhance: deterministic enhancement for 8-bit RGBA rasters
//!
//! A fixed sequence of numeric filters driven by one intensity level
//! (`0..=100`). Every stage is a pure function over a [`PixelBuffer`]; the
//! whole local pipeline is synchronous and needs no I/O.
//!
//! # Quick Start
//!
//! ```
//! use pixel_enhance::{EnhancementLevel, EnhancementPipeline, PipelineMode, PixelBuffer};
//!
//! let input = PixelBuffer::filled(8, 8, [120, 90, 60, 255]);
//! let level = EnhancementLevel::new(65).unwrap();
//!
//! let pipeline = EnhancementPipeline::new();
//! let output = pipeline.run_local(input, level);
//!
//! assert_eq!(output.dimensions(), (8, 8));
//! assert_eq!(pipeline.mode(level), PipelineMode::LocalOnly);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer             (decoded RGBA, owned by the caller)
//!     |
//!     v
//! Denoise        factor > 0.3   box blur, radius floor(2 * factor)
//!     |
//! Sharpen        factor > 0.4   3x3 unsharp mask, centre 5 + 2 * factor
//!     |
//! Tonal          always         brightness 1 + 0.35f, contrast 1 + 0.6f
//!     |
//! Vibrance       always         saturation 1 + 0.5f, weighted by chroma
//!     |
//! EdgeEnhance    factor > 0.6   + |dx| + |dy| scaled by (f - 0.6) * 2.5 * 0.1
//!     |
//!     v
//! local result  --(level > 75)-->  remote polish (intensity 30), outside this crate
//! ```
//!
//! `factor` is `level / 100`. Each gate is an independent strict comparison,
//! so level 30 skips the denoiser and level 31 schedules it.
//!
//! # Border Policy
//!
//! Neighborhood stages only compute pixels that have a full neighborhood.
//! Pixels within the stage's radius of an edge keep the value produced by
//! the previous stage. There is no mirroring or clamping of coordinates.
//!
//! # Known Oddities
//!
//! - For levels 31..=49 the denoiser is scheduled with radius 0, which is a
//!   no-op. Blurring begins at level 50.
//! - The sharpening kernel sums to `1 + 2 * factor`, so flat regions are
//!   brightened along with edges.
//! - Edge enhancement only ever adds, so edges brighten rather than gaining
//!   symmetric contrast.
//!
//! These are part of the established output for existing levels and are kept.

pub mod buffer;
pub mod error;
pub mod level;
pub mod pipeline;
pub mod stages;


pub use buffer::{BufferError, Channel, PixelBuffer};
pub use error::EnhanceError;
pub use level::{EnhancementLevel, LevelError};
pub use pipeline::{
    EnhancementPipeline, PipelineMode, StagePlan, REMOTE_POLISH_INSTRUCTION,
    REMOTE_POLISH_INTENSITY, REMOTE_POLISH_THRESHOLD,
};
pub use stages::{Denoise, EdgeEnhance, Sharpen, Stage, Tonal, Vibrance};
