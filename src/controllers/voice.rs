use super::synthesis::SessionState;
use crate::{
    domain::voice::{VoiceCatalog, VoiceFilter, VoiceProfile},
    error::{AppError, AppResult},
    infrastructure::media::AudioPlayer,
};
use std::path::PathBuf;
use std::sync::Arc;

pub struct VoiceController {
    catalog: Arc<VoiceCatalog>,
    player: Arc<dyn AudioPlayer>,
    sample_dir: PathBuf,
}

impl VoiceController {
    pub fn new(catalog: Arc<VoiceCatalog>, player: Arc<dyn AudioPlayer>, sample_dir: PathBuf) -> Self {
        Self {
            catalog,
            player,
            sample_dir,
        }
    }

    /// Render the filtered voice list, grouped by scene, one voice per line
    pub fn list(&self, filter: &VoiceFilter) -> Vec<String> {
        let voices = self.catalog.filter(filter);
        tracing::debug!(shown = voices.len(), total = self.catalog.len(), "Voice list filtered");

        if voices.is_empty() {
            return vec!["No matching voices".to_string()];
        }

        let mut lines = Vec::new();
        for (scene, members) in VoiceCatalog::group_by_scene(&voices) {
            lines.push(format!("[{}]", scene));
            for voice in members {
                lines.push(format_voice(voice));
            }
        }
        lines.push(format!("{} voice(s)", voices.len()));
        lines
    }

    /// Values accepted by the scene filter
    pub fn scenes(&self) -> Vec<String> {
        self.catalog.scenes()
    }

    /// Values accepted by the category filter
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Make `voice_id` the session's voice. Ids missing from the table are still
    /// accepted, since the remote service may know voices the local table does not.
    pub fn select(&self, session: &mut SessionState, voice_id: u32) -> String {
        match self.catalog.find(voice_id) {
            Some(profile) => {
                let name = profile.name.clone();
                session.select_voice(profile.clone());
                tracing::info!(voice_id, voice_name = %name, "Voice selected");
                name
            }
            None => {
                tracing::warn!(voice_id, "Voice id not in the voice table, using it as-is");
                session.voice.voice_id = voice_id;
                session.selected_voice = None;
                self.catalog.display_name(voice_id)
            }
        }
    }

    /// Play the bundled sample for a voice
    pub fn preview(&self, voice_id: u32) -> AppResult<PathBuf> {
        let voice = self
            .catalog
            .find(voice_id)
            .ok_or_else(|| AppError::NotFound(format!("Voice {} is not in the voice table", voice_id)))?;

        let sample = VoiceCatalog::find_sample(voice_id, &self.sample_dir).ok_or_else(|| {
            AppError::NotFound(format!("No sample audio for voice {} ({})", voice.name, voice_id))
        })?;

        self.player
            .play(&sample)
            .map_err(|e| AppError::Media(e.to_string()))?;

        Ok(sample)
    }
}

fn format_voice(voice: &VoiceProfile) -> String {
    format!(
        "  {:>7}  {}  ({}, {}, {}, {}, {})",
        voice.voice_id,
        voice.name,
        voice.gender(),
        voice.category,
        voice.language,
        voice.sample_rate,
        voice.emotion
    )
}
