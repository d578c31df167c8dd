use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("media error: {0}")]
    Media(String),
    /// Local file handling; carries the full cause chain
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Media(msg) => AppError::Media(msg),
            TtsServiceError::Other(e) => AppError::Internal(format!("{:#}", e)),
        }
    }
}
