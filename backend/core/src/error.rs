use thiserror::Error;

/// Top-level error type for the PhyAssist feedback pipeline.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("LLM provider error ({provider}): {message}")]
    Upstream { provider: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TutorError {
    /// True for errors caused by the caller's payload rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TutorError::InvalidInput(_))
    }
}
