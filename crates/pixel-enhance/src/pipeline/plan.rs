//! Stage gating and derived parameters for a level.

use crate::level::EnhancementLevel;
use crate::stages::{Denoise, EdgeEnhance, Sharpen, Stage, Tonal, Vibrance};

/// Levels above this are finished by the remote polish pass.
pub const REMOTE_POLISH_THRESHOLD: u8 = 75;

/// Fixed intensity sent with every remote polish request.
pub const REMOTE_POLISH_INTENSITY: EnhancementLevel = EnhancementLevel::saturating(30);

/// Fixed instruction sent with every remote polish request.
pub const REMOTE_POLISH_INSTRUCTION: &str = "This image has already been enhanced locally. \
Make only minimal corrective changes: fix remaining noise or color casts, \
and do not alter composition, content, or overall style.";

/// Whether the locally enhanced buffer is final or is handed to remote polish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    LocalOnly,
    LocalPlusRemote,
}

impl PipelineMode {
    pub fn for_level(level: EnhancementLevel) -> Self {
        if level.get() > REMOTE_POLISH_THRESHOLD {
            PipelineMode::LocalPlusRemote
        } else {
            PipelineMode::LocalOnly
        }
    }

    /// Stable kebab-case name for logs and API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::LocalOnly => "local-only",
            PipelineMode::LocalPlusRemote => "local-plus-remote",
        }
    }
}

/// Which stages run for a level, with their parameters.
///
/// Stage order is fixed: denoise, sharpen, tonal, vibrance, edge. Gated
/// stages are `None`; tonal and vibrance are always present.
///
/// ```
/// use pixel_enhance::{EnhancementLevel, StagePlan};
///
/// let plan = StagePlan::for_level(EnhancementLevel::new(45).unwrap());
/// assert_eq!(plan.stage_names(), vec!["denoise", "sharpen", "tonal", "vibrance"]);
/// assert_eq!(plan.denoise.unwrap().radius, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StagePlan {
    pub level: EnhancementLevel,
    pub denoise: Option<Denoise>,
    pub sharpen: Option<Sharpen>,
    pub tonal: Tonal,
    pub vibrance: Vibrance,
    pub edge: Option<EdgeEnhance>,
}

impl StagePlan {
    pub fn for_level(level: EnhancementLevel) -> Self {
        let factor = level.factor();
        Self {
            level,
            denoise: Denoise::for_factor(factor),
            sharpen: Sharpen::for_factor(factor),
            tonal: Tonal::for_factor(factor),
            vibrance: Vibrance::for_factor(factor),
            edge: EdgeEnhance::for_factor(factor),
        }
    }

    /// Scheduled stages in execution order.
    pub fn stages(&self) -> Vec<&dyn Stage> {
        let mut stages: Vec<&dyn Stage> = Vec::with_capacity(5);
        if let Some(denoise) = &self.denoise {
            stages.push(denoise);
        }
        if let Some(sharpen) = &self.sharpen {
            stages.push(sharpen);
        }
        stages.push(&self.tonal);
        stages.push(&self.vibrance);
        if let Some(edge) = &self.edge {
            stages.push(edge);
        }
        stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages().iter().map(|s| s.name()).collect()
    }

    pub fn mode(&self) -> PipelineMode {
        PipelineMode::for_level(self.level)
    }
}
