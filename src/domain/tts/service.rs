use super::error::TtsServiceError;
use super::model::{SynthesisEvent, SynthesisRequest, SynthesisResult};
use super::segmenter::{segment_text, TextSegment};
use crate::infrastructure::media::{AudioConcatenator, SegmentWorkspace};
use crate::infrastructure::repositories::TtsRepository;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

const PREVIEW_CHARS: usize = 30;

/// Optional channel for progress notifications. Sending never fails the synthesis.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    sender: Option<UnboundedSender<SynthesisEvent>>,
}

impl ProgressSink {
    pub fn new(sender: UnboundedSender<SynthesisEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: SynthesisEvent) {
        if let Some(sender) = &self.sender {
            // Receiver gone means nobody is watching any more
            let _ = sender.send(event);
        }
    }
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    concatenator: Arc<dyn AudioConcatenator>,
    max_segment_chars: usize,
    work_dir: Option<PathBuf>,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        concatenator: Arc<dyn AudioConcatenator>,
        max_segment_chars: usize,
        work_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            tts_repo,
            concatenator,
            max_segment_chars,
            work_dir,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to a single audio file
    ///
    /// This operation:
    /// - Splits the text into length-bounded segments
    /// - Synthesizes each segment in order, stopping at the first failure
    /// - Joins the segment audio into `output_path`
    /// - Removes every temporary file, whatever the outcome
    ///
    /// Failures are reported through the returned result, never as a partial output file
    async fn synthesize(&self, request: SynthesisRequest, progress: ProgressSink) -> SynthesisResult;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, request: SynthesisRequest, progress: ProgressSink) -> SynthesisResult {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = request.voice.voice_id,
            speed = request.voice.speed,
            volume = request.voice.volume,
            text_length = request.text.chars().count(),
            output = %request.output_path.display(),
            "TTS synthesis request"
        );
        progress.emit(SynthesisEvent::Started {
            char_count: request.text.chars().count(),
        });

        let result = match self.prepare(&request) {
            Err(e) => {
                tracing::warn!(error = %e, "TTS request rejected");
                SynthesisResult::failed(e.to_string(), 0)
            }
            Ok(segments) => {
                let segment_count = segments.len();
                progress.emit(SynthesisEvent::Segmented { segment_count });

                match self.render(&request, &segments, &progress).await {
                    Ok(path) => SynthesisResult::succeeded(path, segment_count),
                    Err(e) => {
                        tracing::error!(error = %e, segment_count, "TTS synthesis failed");
                        SynthesisResult::failed(e.to_string(), segment_count)
                    }
                }
            }
        };

        tracing::info!(
            success = result.success,
            segment_count = result.segment_count,
            latency_ms = start_time.elapsed().as_millis(),
            "TTS synthesis completed"
        );
        progress.emit(SynthesisEvent::Finished {
            result: result.clone(),
        });

        result
    }
}

impl TtsService {
    /// Validate the request and split its text
    fn prepare(&self, request: &SynthesisRequest) -> Result<Vec<TextSegment>, TtsServiceError> {
        if request.text.trim().is_empty() {
            return Err(TtsServiceError::Invalid("Text cannot be empty".to_string()));
        }

        request.voice.validate().map_err(TtsServiceError::Invalid)?;

        let segments = segment_text(&request.text, self.max_segment_chars);
        if segments.is_empty() {
            return Err(TtsServiceError::Invalid(
                "Text has no content to synthesize".to_string(),
            ));
        }

        tracing::info!(
            segment_count = segments.len(),
            max_segment_chars = self.max_segment_chars,
            "Text split into segments"
        );

        Ok(segments)
    }

    /// Run the segments through the workspace, cleaning it up on every path.
    /// The output path is only written once the joined audio is complete.
    async fn render(
        &self,
        request: &SynthesisRequest,
        segments: &[TextSegment],
        progress: &ProgressSink,
    ) -> Result<PathBuf, TtsServiceError> {
        let mut workspace = SegmentWorkspace::create(self.work_dir.as_deref())
            .context("failed to create segment workspace")?;

        let result = self
            .render_in(&mut workspace, request, segments, progress)
            .await;

        workspace.cleanup();

        result
    }

    async fn render_in(
        &self,
        workspace: &mut SegmentWorkspace,
        request: &SynthesisRequest,
        segments: &[TextSegment],
        progress: &ProgressSink,
    ) -> Result<PathBuf, TtsServiceError> {
        let total = segments.len();

        for segment in segments {
            progress.emit(SynthesisEvent::SegmentStarted {
                index: segment.index,
                total,
                preview: segment.preview(PREVIEW_CHARS),
                char_count: segment.char_count(),
            });

            let audio = self
                .tts_repo
                .synthesize_segment(segment, &request.voice)
                .await
                .map_err(|e| {
                    TtsServiceError::Dependency(format!(
                        "segment {}/{} failed: {}",
                        segment.index + 1,
                        total,
                        e
                    ))
                })?;

            workspace
                .write_segment(segment.index, &audio)
                .await
                .with_context(|| {
                    format!("failed to store audio for segment {}/{}", segment.index + 1, total)
                })?;

            progress.emit(SynthesisEvent::SegmentCompleted {
                index: segment.index,
                total,
            });
        }

        if let Some(parent) = request.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create output directory {}", parent.display()))?;
        }

        progress.emit(SynthesisEvent::Concatenating {
            segment_count: workspace.segment_files().len(),
        });

        let staged = workspace.staged_output_path(&request.output_path);
        self.concatenator
            .concatenate(
                workspace.segment_files(),
                &workspace.concat_list_path(),
                &staged,
            )
            .await
            .map_err(|e| TtsServiceError::Media(e.to_string()))?;

        publish_output(&staged, &request.output_path)
            .await
            .with_context(|| format!("failed to write {}", request.output_path.display()))?;

        Ok(request.output_path.clone())
    }
}

/// Move the staged audio over the output. Falls back to copying when the
/// workspace is on another filesystem.
async fn publish_output(staged: &Path, output: &Path) -> std::io::Result<()> {
    if let Err(e) = tokio::fs::rename(staged, output).await {
        tracing::debug!(error = %e, "Rename failed, copying joined audio instead");
        tokio::fs::copy(staged, output).await?;
    }
    tracing::debug!(output = %output.display(), "Joined audio published");
    Ok(())
}
