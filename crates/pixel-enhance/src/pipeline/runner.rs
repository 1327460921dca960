//! Local pipeline execution.

use super::plan::{PipelineMode, StagePlan};
use crate::buffer::PixelBuffer;
use crate::level::EnhancementLevel;
use crate::stages::Stage;

/// Runs the local stages for a level and decides whether the result is
/// final.
///
/// The pipeline holds no per-call state; one instance can serve any number
/// of sequential or concurrent calls, each owning its own buffers.
///
/// # Example
///
/// ```
/// use pixel_enhance::{EnhancementLevel, EnhancementPipeline, PipelineMode, PixelBuffer};
///
/// let pipeline = EnhancementPipeline::new();
/// let input = PixelBuffer::filled(3, 3, [128, 128, 128, 255]);
///
/// let output = pipeline.run_local(input.clone(), EnhancementLevel::MIN);
/// assert_eq!(output, input);
///
/// assert_eq!(pipeline.mode(EnhancementLevel::new(76).unwrap()), PipelineMode::LocalPlusRemote);
/// let local = EnhancementPipeline::new().remote_polish(false);
/// assert_eq!(local.mode(EnhancementLevel::MAX), PipelineMode::LocalOnly);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EnhancementPipeline {
    remote_polish: bool,
}

impl Default for EnhancementPipeline {
    fn default() -> Self {
        Self {
            remote_polish: true,
        }
    }
}

impl EnhancementPipeline {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or forbid delegation to remote polish. When forbidden, every
    /// level is [`PipelineMode::LocalOnly`].
    #[inline]
    pub fn remote_polish(mut self, enabled: bool) -> Self {
        self.remote_polish = enabled;
        self
    }

    pub fn plan(&self, level: EnhancementLevel) -> StagePlan {
        StagePlan::for_level(level)
    }

    pub fn mode(&self, level: EnhancementLevel) -> PipelineMode {
        if self.remote_polish {
            PipelineMode::for_level(level)
        } else {
            PipelineMode::LocalOnly
        }
    }

    /// Run every scheduled stage in order, each on the previous stage's output.
    pub fn run_local(&self, buffer: PixelBuffer, level: EnhancementLevel) -> PixelBuffer {
        self.run_local_with(buffer, level, |_, _| {})
    }

    /// Like [`run_local`](Self::run_local), calling `on_stage` with each
    /// stage and its output as soon as the stage finishes.
    pub fn run_local_with<F>(
        &self,
        buffer: PixelBuffer,
        level: EnhancementLevel,
        mut on_stage: F,
    ) -> PixelBuffer
    where
        F: FnMut(&dyn Stage, &PixelBuffer),
    {
        let plan = self.plan(level);
        let mut current = buffer;
        for stage in plan.stages() {
            current = stage.apply(&current);
            on_stage(stage, &current);
        }
        current
    }
}
