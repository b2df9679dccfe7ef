pub mod prompt;
pub mod providers;
pub mod tutor;

pub use prompt::build_prompt;
pub use tutor::FeedbackTutor;
