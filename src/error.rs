/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Media tool error: {0}")]
    Media(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BadRequest(_) | Self::NotFound(_) | Self::Conflict(_) => 1,
            Self::Config(_) | Self::Credentials(_) => 2,
            Self::ExternalService(_) | Self::Media(_) | Self::Io(_) | Self::Internal(_) => 3,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
