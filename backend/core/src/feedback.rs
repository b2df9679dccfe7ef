//! Feedback request/response types shared by the service and the client.
//!
//! The wire format is camelCase JSON: `{ image, mimeType, question }` in,
//! `{ feedback }` or `{ error }` out.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::TutorError;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing image, mimeType, or question in request.";
pub const UNSUPPORTED_MIME_MESSAGE: &str =
    "Unsupported mimeType; expected image/png or image/jpeg.";
pub const INVALID_IMAGE_MESSAGE: &str = "Image payload is not valid base64.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred while analyzing the solution.";

/// Image formats accepted for a handwritten solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg", alias = "image/jpg")]
    Jpeg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }

    /// Guess the mime type from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageMime::Png),
            "jpg" | "jpeg" => Some(ImageMime::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMime {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(ImageMime::Png),
            "image/jpeg" | "image/jpg" => Ok(ImageMime::Jpeg),
            _ => Err(TutorError::InvalidInput(UNSUPPORTED_MIME_MESSAGE.to_string())),
        }
    }
}

/// JSON body of `POST /api/feedback`.
///
/// Every field is optional on the wire so that a missing field becomes a
/// descriptive 400 instead of a generic deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl FeedbackPayload {
    pub fn new(
        question: impl Into<String>,
        image_base64: impl Into<String>,
        mime_type: ImageMime,
    ) -> Self {
        Self {
            image: Some(image_base64.into()),
            mime_type: Some(mime_type.as_str().to_string()),
            question: Some(question.into()),
        }
    }

    /// Validate the payload and decode the image.
    pub fn into_request(self) -> Result<FeedbackRequest, TutorError> {
        let (Some(image), Some(mime_type), Some(question)) = (
            non_blank(self.image),
            non_blank(self.mime_type),
            non_blank(self.question),
        ) else {
            return Err(TutorError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let mime_type: ImageMime = mime_type.parse()?;

        let image_bytes = STANDARD
            .decode(image.trim())
            .map_err(|_| TutorError::InvalidInput(INVALID_IMAGE_MESSAGE.to_string()))?;
        if image_bytes.is_empty() {
            return Err(TutorError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        }

        Ok(FeedbackRequest {
            question,
            image_bytes,
            mime_type,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A validated feedback request, consumed once by the tutor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub question: String,
    pub image_bytes: Vec<u8>,
    pub mime_type: ImageMime,
}

/// Response envelope: either feedback text or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackEnvelope {
    Success { feedback: String },
    Failure { error: String },
}

impl FeedbackEnvelope {
    pub fn success(feedback: impl Into<String>) -> Self {
        Self::Success {
            feedback: feedback.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }
}
