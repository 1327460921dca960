//! Orchestration: which stages run, in what order, and whether the local
//! result is handed to remote polish.
//!
//! # Modes
//!
//! | Level | Mode | Final output |
//! |-------|------|--------------|
//! | 0..=75 | [`PipelineMode::LocalOnly`] | locally enhanced buffer |
//! | 76..=100 | [`PipelineMode::LocalPlusRemote`] | remote polish of the local buffer, or the local buffer if polish fails |
//!
//! The local buffer is always computed before any remote call, so a remote
//! failure never leaves the caller without a result. Remote polish itself
//! lives outside this crate; this module only fixes its parameters
//! ([`REMOTE_POLISH_INTENSITY`], [`REMOTE_POLISH_INSTRUCTION`]).

mod plan;
mod runner;

pub use plan::{
    PipelineMode, StagePlan, REMOTE_POLISH_INSTRUCTION, REMOTE_POLISH_INTENSITY,
    REMOTE_POLISH_THRESHOLD,
};
pub use runner::EnhancementPipeline;
