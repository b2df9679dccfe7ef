//! The PhyAssist client: a one-question feedback form, the HTTP call to the
//! feedback service, and an HTML page for the result.

pub mod api;
pub mod error;
pub mod form;
pub mod page;
pub mod upload;

pub use api::FeedbackClient;
pub use error::ClientError;
pub use form::{FeedbackForm, FormEvent, FormState};
pub use page::render_page;
pub use upload::SelectedFile;
