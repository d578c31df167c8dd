use serde::{Deserialize, Serialize};

const FEMALE_TAG: &str = "女声";
const MALE_TAG: &str = "男声";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | FEMALE_TAG => Ok(Gender::Female),
            "male" | "m" | MALE_TAG => Ok(Gender::Male),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// A selectable voice preset, one row of the voice table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub voice_id: u32,
    pub name: String,
    pub scene: String,
    pub category: String,
    pub language: String,
    pub sample_rate: String,
    pub emotion: String,
}

impl VoiceProfile {
    /// Female unless the scene tag marks the voice as male
    pub fn gender(&self) -> Gender {
        if self.scene.contains(FEMALE_TAG) || !self.scene.contains(MALE_TAG) {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Scene tag without the gender words
    pub fn cleaned_scene(&self) -> String {
        self.scene
            .replace(MALE_TAG, "")
            .replace(FEMALE_TAG, "")
            .trim()
            .to_string()
    }
}

/// Criteria for narrowing the voice list. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct VoiceFilter {
    pub scene: Option<String>,
    pub gender: Option<Gender>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl VoiceFilter {
    pub fn matches(&self, voice: &VoiceProfile) -> bool {
        if let Some(scene) = &self.scene {
            if voice.cleaned_scene() != *scene {
                return false;
            }
        }
        if let Some(gender) = self.gender {
            if voice.gender() != gender {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if voice.category != *category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !voice.name.to_lowercase().contains(&needle)
                && !voice.scene.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
