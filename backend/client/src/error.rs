use thiserror::Error;

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide a question and upload an image of your solution.";
pub const SERVER_FALLBACK_MESSAGE: &str = "Failed to get feedback from the server.";
pub const MISSING_API_URL_MESSAGE: &str = "Configuration error: The API URL is not set. \
Set PHYASSIST_API_URL to the feedback service address.";

/// Client-side failures. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Config(String),

    #[error("Could not read the selected image: {0}")]
    Encoding(String),

    /// The service answered with a non-success status.
    #[error("{0}")]
    Server(String),

    #[error("Failed to get feedback from the server.")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn missing_api_url() -> Self {
        ClientError::Config(MISSING_API_URL_MESSAGE.to_string())
    }
}
