use crate::error::{AppError, AppResult};
use std::path::Path;

/// API key pair for the TTS provider
#[derive(Clone)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read the key pair from a CSV file with a header row.
    ///
    /// The first data row's first two columns are the secret id and secret key.
    pub fn load_from_csv(path: &Path) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                AppError::Credentials(format!(
                    "Failed to open credential file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let record = reader
            .records()
            .next()
            .transpose()
            .map_err(|e| {
                AppError::Credentials(format!(
                    "Failed to read credential file {}: {}",
                    path.display(),
                    e
                ))
            })?
            .ok_or_else(|| {
                AppError::Credentials(format!("No credential row in {}", path.display()))
            })?;

        match (record.get(0), record.get(1)) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => {
                tracing::info!(path = %path.display(), "Credentials loaded");
                Ok(Self {
                    secret_id: id.to_string(),
                    secret_key: key.to_string(),
                })
            }
            _ => Err(AppError::Credentials(format!(
                "Credential row in {} must contain a secret id and a secret key",
                path.display()
            ))),
        }
    }
}
