pub mod error;
pub mod model;
pub mod segmenter;
pub mod service;

pub use error::TtsServiceError;
pub use model::{SynthesisEvent, SynthesisRequest, SynthesisResult, VoiceSettings};
pub use segmenter::{segment_text, TextSegment, DEFAULT_MAX_SEGMENT_CHARS};
pub use service::{ProgressSink, TtsService, TtsServiceApi};
