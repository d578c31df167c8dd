use crate::{
    domain::{
        tts::{ProgressSink, SynthesisEvent, SynthesisRequest, SynthesisResult, TtsServiceApi, VoiceSettings},
        voice::VoiceProfile,
    },
    error::{AppError, AppResult},
    infrastructure::media::AudioPlayer,
};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

/// Interface-side state: owned by the presentation layer, passed to handlers by reference
#[derive(Debug, Clone)]
pub struct SessionState {
    pub selected_voice: Option<VoiceProfile>,
    pub voice: VoiceSettings,
    pub current_audio: Option<PathBuf>,
    in_flight: bool,
}

impl SessionState {
    pub fn new(voice: VoiceSettings) -> Self {
        Self {
            selected_voice: None,
            voice,
            current_audio: None,
            in_flight: false,
        }
    }

    pub fn select_voice(&mut self, profile: VoiceProfile) {
        self.voice.voice_id = profile.voice_id;
        self.selected_voice = Some(profile);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(VoiceSettings::default())
    }
}

/// A synthesis running on its own task
pub struct SynthesisJob {
    pub events: UnboundedReceiver<SynthesisEvent>,
    handle: JoinHandle<SynthesisResult>,
}

impl SynthesisJob {
    /// Wait for the worker and return its result
    pub async fn wait(self) -> SynthesisResult {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Synthesis task did not complete");
                SynthesisResult::failed(format!("synthesis task did not complete: {}", e), 0)
            }
        }
    }
}

pub struct SynthesisController {
    tts_service: Arc<dyn TtsServiceApi>,
    player: Arc<dyn AudioPlayer>,
    audio_dir: PathBuf,
}

impl SynthesisController {
    pub fn new(
        tts_service: Arc<dyn TtsServiceApi>,
        player: Arc<dyn AudioPlayer>,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            tts_service,
            player,
            audio_dir,
        }
    }

    /// Start a synthesis on a background task
    ///
    /// Only one synthesis per session may be in flight; the session is marked busy
    /// until `complete` is called with the job's result.
    pub fn submit(
        &self,
        session: &mut SessionState,
        text: String,
        output_path: PathBuf,
    ) -> AppResult<SynthesisJob> {
        if session.in_flight {
            return Err(AppError::Conflict(
                "A synthesis is already in progress".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        let request = SynthesisRequest {
            text,
            voice: session.voice,
            output_path,
        };

        tracing::info!(
            voice_id = request.voice.voice_id,
            voice_name = session.selected_voice.as_ref().map(|v| v.name.as_str()).unwrap_or("-"),
            output = %request.output_path.display(),
            "Submitting synthesis"
        );

        let (sender, events) = mpsc::unbounded_channel();
        let service = self.tts_service.clone();
        let handle = tokio::spawn(async move {
            service.synthesize(request, ProgressSink::new(sender)).await
        });

        session.in_flight = true;
        Ok(SynthesisJob { events, handle })
    }

    /// Apply a finished job's result to the session, optionally playing the new audio.
    /// Playback problems are logged; they never turn a finished synthesis into a failure.
    pub fn complete(&self, session: &mut SessionState, result: &SynthesisResult, autoplay: bool) {
        session.in_flight = false;

        if !result.success {
            return;
        }

        session.current_audio = result.output_path.clone();
        if autoplay {
            if let Err(e) = self.play_current(session) {
                tracing::warn!(error = %e, "Autoplay failed, audio was still written");
            }
        }
    }

    /// Submit, forward every progress event to `on_event`, then complete
    pub async fn run<F>(
        &self,
        session: &mut SessionState,
        text: String,
        output_path: PathBuf,
        autoplay: bool,
        mut on_event: F,
    ) -> AppResult<SynthesisResult>
    where
        F: FnMut(&SynthesisEvent),
    {
        let mut job = self.submit(session, text, output_path)?;

        while let Some(event) = job.events.recv().await {
            on_event(&event);
        }

        let result = job.wait().await;
        self.complete(session, &result, autoplay);
        Ok(result)
    }

    pub fn play_current(&self, session: &SessionState) -> AppResult<()> {
        let path = session
            .current_audio
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No audio has been synthesized yet".to_string()))?;

        self.player
            .play(path)
            .map_err(|e| AppError::Media(e.to_string()))
    }

    /// `<audio dir>/<voice id>_<YYYYmmdd_HHMMSS>.wav`
    pub fn default_output_path(&self, voice_id: u32, now: DateTime<Local>) -> PathBuf {
        self.audio_dir
            .join(format!("{}_{}.wav", voice_id, now.format("%Y%m%d_%H%M%S")))
    }
}
