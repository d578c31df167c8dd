use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_VOICE_ID: u32 = 101012;
pub const DEFAULT_SPEED: f32 = 0.0;
pub const DEFAULT_VOLUME: f32 = 5.0;

pub const SPEED_RANGE: (f32, f32) = (-2.0, 6.0);
pub const VOLUME_RANGE: (f32, f32) = (-10.0, 10.0);

/// Voice parameters sent with every segment of one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub voice_id: u32,
    pub speed: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_id: DEFAULT_VOICE_ID,
            speed: DEFAULT_SPEED,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl VoiceSettings {
    pub fn validate(&self) -> Result<(), String> {
        let (min_speed, max_speed) = SPEED_RANGE;
        if !(min_speed..=max_speed).contains(&self.speed) {
            return Err(format!(
                "Speed must be between {} and {}, got {}",
                min_speed, max_speed, self.speed
            ));
        }
        let (min_volume, max_volume) = VOLUME_RANGE;
        if !(min_volume..=max_volume).contains(&self.volume) {
            return Err(format!(
                "Volume must be between {} and {}, got {}",
                min_volume, max_volume, self.volume
            ));
        }
        Ok(())
    }
}

/// One user-triggered synthesis
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoiceSettings,
    pub output_path: PathBuf,
}

/// Terminal value handed back to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub segment_count: usize,
    pub failure_reason: Option<String>,
}

impl SynthesisResult {
    pub fn succeeded(output_path: PathBuf, segment_count: usize) -> Self {
        Self {
            success: true,
            output_path: Some(output_path),
            segment_count,
            failure_reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>, segment_count: usize) -> Self {
        Self {
            success: false,
            output_path: None,
            segment_count,
            failure_reason: Some(reason.into()),
        }
    }
}

/// Progress notifications posted from the synthesis worker
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisEvent {
    Started { char_count: usize },
    Segmented { segment_count: usize },
    SegmentStarted { index: usize, total: usize, preview: String, char_count: usize },
    SegmentCompleted { index: usize, total: usize },
    Concatenating { segment_count: usize },
    Finished { result: SynthesisResult },
}

impl std::fmt::Display for SynthesisEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started { char_count } => write!(f, "Preparing {} characters for synthesis", char_count),
            Self::Segmented { segment_count } => write!(f, "Text split into {} segment(s)", segment_count),
            Self::SegmentStarted { index, total, preview, char_count } => write!(
                f,
                "Synthesizing segment {}/{}: {}... ({} chars)",
                index + 1,
                total,
                preview,
                char_count
            ),
            Self::SegmentCompleted { index, total } => {
                write!(f, "Segment {}/{} synthesized", index + 1, total)
            }
            Self::Concatenating { segment_count } => {
                write!(f, "Joining {} segment(s)", segment_count)
            }
            Self::Finished { result } => match (&result.output_path, &result.failure_reason) {
                (Some(path), _) => write!(f, "Synthesis finished: {}", path.display()),
                (None, Some(reason)) => write!(f, "Synthesis failed: {}", reason),
                (None, None) => write!(f, "Synthesis failed"),
            },
        }
    }
}
