use super::{VoiceFilter, VoiceProfile};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Sample-rate subdirectories searched for preview audio, in order
const SAMPLE_SUBDIRS: &[&str] = &["samples_8k", "samples_16k", "samples_24k"];

/// In-memory voice table, immutable after load
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceProfile>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<VoiceProfile>) -> Self {
        Self { voices }
    }

    pub fn all(&self) -> &[VoiceProfile] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn find(&self, voice_id: u32) -> Option<&VoiceProfile> {
        self.voices.iter().find(|v| v.voice_id == voice_id)
    }

    /// Display name for a voice id, or the id itself when the table has no such voice
    pub fn display_name(&self, voice_id: u32) -> String {
        match self.find(voice_id) {
            Some(voice) => voice.name.clone(),
            None => {
                tracing::debug!(voice_id, "Voice not in table, using id as name");
                voice_id.to_string()
            }
        }
    }

    pub fn filter(&self, filter: &VoiceFilter) -> Vec<&VoiceProfile> {
        self.voices.iter().filter(|v| filter.matches(v)).collect()
    }

    /// Sorted, de-duplicated cleaned scene names
    pub fn scenes(&self) -> Vec<String> {
        self.voices
            .iter()
            .map(|v| v.cleaned_scene())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, de-duplicated category tags
    pub fn categories(&self) -> Vec<String> {
        self.voices
            .iter()
            .map(|v| v.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Group voices by cleaned scene, groups ordered by first appearance
    pub fn group_by_scene<'a>(voices: &[&'a VoiceProfile]) -> Vec<(String, Vec<&'a VoiceProfile>)> {
        let mut groups: Vec<(String, Vec<&'a VoiceProfile>)> = Vec::new();
        for &voice in voices {
            let scene = voice.cleaned_scene();
            match groups.iter_mut().find(|(name, _)| *name == scene) {
                Some((_, members)) => members.push(voice),
                None => groups.push((scene, vec![voice])),
            }
        }
        groups
    }

    /// Locate the preview sample for a voice under `sample_root`
    ///
    /// Returns the first `.mp3`/`.wav` file whose name starts with the voice id,
    /// searching the 8k, 16k and 24k sample directories in that order.
    pub fn find_sample(voice_id: u32, sample_root: &Path) -> Option<PathBuf> {
        let prefix = voice_id.to_string();

        for subdir in SAMPLE_SUBDIRS {
            let dir = sample_root.join(subdir);
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };

            let mut candidates: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                    name.starts_with(&prefix) && (name.ends_with(".mp3") || name.ends_with(".wav"))
                })
                .collect();
            candidates.sort();

            if let Some(path) = candidates.into_iter().next() {
                return Some(path);
            }
        }

        None
    }
}
