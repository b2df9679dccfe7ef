//! The feedback form and its submission state machine.

use phyassist_core::FeedbackPayload;
use tracing::debug;

use crate::api::FeedbackClient;
use crate::error::{ClientError, MISSING_INPUT_MESSAGE};
use crate::upload::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// Checking input and encoding the image.
    Validating,
    /// Waiting for the service.
    Submitting,
    Success { feedback: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FileSelected,
    SubmitPressed,
    InputRejected(String),
    EncodeComplete,
    EncodeFailed(String),
    ResponseReceived(String),
    ResponseFailed(String),
}

impl FormState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FormState::Validating | FormState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<&str> {
        match self {
            FormState::Success { feedback } => Some(feedback),
            _ => None,
        }
    }

    /// Next state for `event`. Events that do not apply leave the state as is.
    pub fn next(&self, event: FormEvent) -> FormState {
        use FormEvent as E;
        use FormState as S;

        match (self, event) {
            (S::Validating | S::Submitting, E::FileSelected | E::SubmitPressed) => self.clone(),
            (_, E::FileSelected) => S::Idle,
            (_, E::SubmitPressed) => S::Validating,
            (S::Validating, E::InputRejected(error) | E::EncodeFailed(error)) => {
                S::Failed { error }
            }
            (S::Validating, E::EncodeComplete) => S::Submitting,
            (S::Submitting, E::ResponseReceived(feedback)) => S::Success { feedback },
            (S::Submitting, E::ResponseFailed(error)) => S::Failed { error },
            (state, event) => {
                debug!(?state, ?event, "Ignoring form event");
                self.clone()
            }
        }
    }
}

/// One question, one image, one request at a time.
pub struct FeedbackForm {
    question: String,
    file: Option<SelectedFile>,
    state: FormState,
    client: Option<FeedbackClient>,
}

impl FeedbackForm {
    /// `client` is `None` when the API URL is not configured.
    pub fn new(client: Option<FeedbackClient>) -> Self {
        Self {
            question: String::new(),
            file: None,
            state: FormState::Idle,
            client,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Choosing a file clears any previous feedback or error.
    pub fn select_file(&mut self, file: SelectedFile) {
        if self.state.is_loading() {
            return;
        }
        self.file = Some(file);
        self.apply(FormEvent::FileSelected);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    fn apply(&mut self, event: FormEvent) {
        self.state = self.state.next(event);
    }

    /// Runs one submission to completion and returns the final state.
    pub async fn submit(&mut self) -> &FormState {
        if !self.can_submit() {
            return &self.state;
        }
        self.apply(FormEvent::SubmitPressed);

        let file = match &self.file {
            Some(file) if !self.question.trim().is_empty() => file.clone(),
            _ => {
                self.apply(FormEvent::InputRejected(MISSING_INPUT_MESSAGE.to_string()));
                return &self.state;
            }
        };

        let Some(client) = self.client.clone() else {
            self.apply(FormEvent::InputRejected(
                ClientError::missing_api_url().to_string(),
            ));
            return &self.state;
        };

        let image = match file.encode().await {
            Ok(image) => image,
            Err(e) => {
                self.apply(FormEvent::EncodeFailed(e.to_string()));
                return &self.state;
            }
        };
        self.apply(FormEvent::EncodeComplete);

        let payload = FeedbackPayload::new(self.question.clone(), image, file.mime_type());
        let event = match client.submit(&payload).await {
            Ok(feedback) => FormEvent::ResponseReceived(feedback),
            Err(e) => FormEvent::ResponseFailed(e.to_string()),
        };
        self.apply(event);
        &self.state
    }
}
