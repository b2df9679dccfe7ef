pub mod error;
pub mod feedback;
pub mod traits;

pub use error::TutorError;
pub use feedback::{
    FeedbackEnvelope, FeedbackPayload, FeedbackRequest, ImageMime, INTERNAL_ERROR_MESSAGE,
    MISSING_FIELDS_MESSAGE,
};
pub use traits::{InlineImage, LlmProvider, LlmRequest, LlmResponse};
