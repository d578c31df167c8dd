use crate::domain::voice::VoiceProfile;
use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Number of columns a voice table row must have
const VOICE_COLUMNS: usize = 7;

/// Loads voice profiles from the CSV voice table
pub struct VoiceRepository {
    path: PathBuf,
}

impl VoiceRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every usable row. Short rows and rows with a non-numeric id are skipped.
    pub fn load(&self) -> AppResult<Vec<VoiceProfile>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| {
                AppError::NotFound(format!(
                    "Voice table {} could not be opened: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let mut voices = Vec::new();
        let mut skipped = 0usize;

        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::BadRequest(format!(
                    "Voice table {} is malformed: {}",
                    self.path.display(),
                    e
                ))
            })?;

            if record.len() < VOICE_COLUMNS {
                skipped += 1;
                continue;
            }

            let Ok(voice_id) = record[0].parse::<u32>() else {
                tracing::warn!(row = line + 2, id = &record[0], "Skipping voice with non-numeric id");
                skipped += 1;
                continue;
            };

            voices.push(VoiceProfile {
                voice_id,
                name: record[1].to_string(),
                scene: record[2].to_string(),
                category: record[3].to_string(),
                language: record[4].to_string(),
                sample_rate: record[5].to_string(),
                emotion: record[6].to_string(),
            });
        }

        tracing::info!(
            path = %self.path.display(),
            voice_count = voices.len(),
            skipped_rows = skipped,
            "Voice table loaded"
        );

        Ok(voices)
    }
}
