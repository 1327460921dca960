use crate::error::{ApiError, PolishError};
use crate::rendering::PngCodec;
use crate::services::remote_polish::RemotePolisher;
use futures_util::future::{BoxFuture, FutureExt};
use pixel_enhance::{
    EnhancementLevel, EnhancementPipeline, PipelineMode, PixelBuffer, REMOTE_POLISH_INSTRUCTION,
    REMOTE_POLISH_INTENSITY,
};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// What happened to the remote polish step.
#[derive(Debug)]
pub enum RemoteStatus {
    /// Level at or below the remote threshold, or remote polish disabled
    NotRequested,
    /// Remote result is the final image
    Applied,
    /// Remote call failed; the local result was kept
    Failed(PolishError),
}

impl RemoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteStatus::NotRequested => "not-requested",
            RemoteStatus::Applied => "applied",
            RemoteStatus::Failed(_) => "failed",
        }
    }

    /// Human-readable note for degraded results.
    pub fn warning(&self) -> Option<String> {
        match self {
            RemoteStatus::Failed(e) => Some(format!(
                "Remote polish failed, returning local result: {e}"
            )),
            _ => None,
        }
    }
}

/// Result of the local pipeline, possibly with a remote polish in flight.
///
/// The local buffer is always complete. Dropping `pending` (or calling
/// [`into_local`](Self::into_local)) cancels the remote call without
/// affecting it.
pub enum EnhancementOutcome {
    LocalOnly(PixelBuffer),
    AwaitingRemote {
        local: PixelBuffer,
        pending: BoxFuture<'static, Result<PixelBuffer, PolishError>>,
    },
}

impl fmt::Debug for EnhancementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhancementOutcome::LocalOnly(buffer) => {
                f.debug_tuple("LocalOnly").field(buffer).finish()
            }
            EnhancementOutcome::AwaitingRemote { local, .. } => f
                .debug_struct("AwaitingRemote")
                .field("local", local)
                .finish_non_exhaustive(),
        }
    }
}

impl EnhancementOutcome {
    pub fn mode(&self) -> PipelineMode {
        match self {
            EnhancementOutcome::LocalOnly(_) => PipelineMode::LocalOnly,
            EnhancementOutcome::AwaitingRemote { .. } => PipelineMode::LocalPlusRemote,
        }
    }

    pub fn local(&self) -> &PixelBuffer {
        match self {
            EnhancementOutcome::LocalOnly(buffer) => buffer,
            EnhancementOutcome::AwaitingRemote { local, .. } => local,
        }
    }

    /// Abandon any pending remote call and keep the local result.
    pub fn into_local(self) -> PixelBuffer {
        match self {
            EnhancementOutcome::LocalOnly(buffer) => buffer,
            EnhancementOutcome::AwaitingRemote { local, .. } => local,
        }
    }

    /// Wait for the remote call, falling back to the local result on failure.
    pub async fn resolve(self) -> EnhancementReport {
        match self {
            EnhancementOutcome::LocalOnly(buffer) => EnhancementReport {
                buffer,
                mode: PipelineMode::LocalOnly,
                remote: RemoteStatus::NotRequested,
            },
            EnhancementOutcome::AwaitingRemote { local, pending } => match pending.await {
                Ok(buffer) => {
                    tracing::debug!("Remote polish applied");
                    EnhancementReport {
                        buffer,
                        mode: PipelineMode::LocalPlusRemote,
                        remote: RemoteStatus::Applied,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind(),
                        transient = e.is_transient(),
                        "Remote polish failed, keeping local result"
                    );
                    EnhancementReport {
                        buffer: local,
                        mode: PipelineMode::LocalPlusRemote,
                        remote: RemoteStatus::Failed(e),
                    }
                }
            },
        }
    }
}

/// Final buffer plus how it was produced.
#[derive(Debug)]
pub struct EnhancementReport {
    pub buffer: PixelBuffer,
    pub mode: PipelineMode,
    pub remote: RemoteStatus,
}

/// Encoded counterpart of [`EnhancementReport`].
#[derive(Debug)]
pub struct EncodedEnhancement {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub level: EnhancementLevel,
    pub mode: PipelineMode,
    pub remote: RemoteStatus,
}

/// Runs the local pipeline off the async runtime and hands the result to
/// remote polish when the level calls for it.
pub struct EnhancementService {
    pipeline: EnhancementPipeline,
    polisher: Arc<dyn RemotePolisher>,
    codec: PngCodec,
}

impl EnhancementService {
    pub fn new(polisher: Arc<dyn RemotePolisher>, codec: PngCodec) -> Self {
        Self {
            pipeline: EnhancementPipeline::new(),
            polisher,
            codec,
        }
    }

    /// Allow or forbid remote polish for every level.
    pub fn remote_polish(mut self, enabled: bool) -> Self {
        self.pipeline = self.pipeline.remote_polish(enabled);
        self
    }

    pub fn pipeline(&self) -> &EnhancementPipeline {
        &self.pipeline
    }

    pub fn codec(&self) -> PngCodec {
        self.codec
    }

    /// Run the local stages and, above the remote threshold, start the
    /// remote polish of the local result.
    ///
    /// Uses spawn_blocking so the CPU-bound filters do not stall the
    /// async runtime.
    pub async fn enhance(
        &self,
        buffer: PixelBuffer,
        level: EnhancementLevel,
    ) -> Result<EnhancementOutcome, ApiError> {
        let pipeline = self.pipeline;
        let mode = pipeline.mode(level);
        let (width, height) = buffer.dimensions();

        let local = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let output = pipeline.run_local_with(buffer, level, |stage, _| {
                tracing::debug!(stage = stage.name(), level = level.get(), "Stage applied");
            });
            tracing::info!(
                width,
                height,
                level = level.get(),
                mode = mode.as_str(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Local enhancement finished"
            );
            output
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Enhancement task failed: {e}")))?;

        match mode {
            PipelineMode::LocalOnly => Ok(EnhancementOutcome::LocalOnly(local)),
            PipelineMode::LocalPlusRemote => {
                let polisher = self.polisher.clone();
                let submitted = local.clone();
                let pending = async move {
                    let polished = polisher
                        .polish(&submitted, REMOTE_POLISH_INTENSITY, REMOTE_POLISH_INSTRUCTION)
                        .await?;
                    if polished.dimensions() != submitted.dimensions() {
                        return Err(PolishError::DimensionMismatch {
                            width: submitted.width(),
                            height: submitted.height(),
                            actual_width: polished.width(),
                            actual_height: polished.height(),
                        });
                    }
                    Ok(polished)
                }
                .boxed();

                Ok(EnhancementOutcome::AwaitingRemote { local, pending })
            }
        }
    }

    /// Enhance and wait for any remote step to finish or fail.
    pub async fn enhance_resolved(
        &self,
        buffer: PixelBuffer,
        level: EnhancementLevel,
    ) -> Result<EnhancementReport, ApiError> {
        Ok(self.enhance(buffer, level).await?.resolve().await)
    }

    /// Decode PNG bytes, enhance, and encode the final buffer.
    pub async fn enhance_png(
        &self,
        png: Vec<u8>,
        level: EnhancementLevel,
    ) -> Result<EncodedEnhancement, ApiError> {
        let codec = self.codec;
        let buffer = tokio::task::spawn_blocking(move || codec.decode(&png))
            .await
            .map_err(|e| ApiError::Internal(format!("Decode task failed: {e}")))??;

        let report = self.enhance_resolved(buffer, level).await?;
        let (width, height) = report.buffer.dimensions();
        let buffer = report.buffer;

        let png = tokio::task::spawn_blocking(move || codec.encode(&buffer))
            .await
            .map_err(|e| ApiError::Internal(format!("Encode task failed: {e}")))??;

        Ok(EncodedEnhancement {
            png,
            width,
            height,
            level,
            mode: report.mode,
            remote: report.remote,
        })
    }
}
