use crate::domain::tts::{TextSegment, VoiceSettings};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider behind a per-segment call.
///
/// Implementations are responsible for:
/// - Building and authenticating the provider request
/// - Decoding the returned audio payload
///
/// Segmenting the text and joining the audio is done by the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one text segment with the given voice settings
    ///
    /// Returns the decoded audio bytes (WAV)
    ///
    /// # Errors
    /// Returns error if the remote call fails, the provider reports an error,
    /// or the payload cannot be decoded
    async fn synthesize_segment(
        &self,
        segment: &TextSegment,
        voice: &VoiceSettings,
    ) -> Result<Vec<u8>, String>;
}
