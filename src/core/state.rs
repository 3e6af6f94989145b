//! # Application State
//!
//! Core business state for the page. Domain logic only, no TUI types.
//! Presentation state (focus, cursors, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // chat-completion service
//! ├── lead_capture: Arc<dyn LeadCapture>     // form-submission service
//! ├── draft: FormDraft                       // what the user typed
//! ├── flags: SubmissionFlags                 // is_submitted / show_results
//! ├── messages: Vec<ChatMessage>             // user echo + streamed reply
//! ├── lead: LeadCaptureState                 // outcome of the lead POST
//! ├── report: ReportStatus                   // outcome of the chat stream
//! ├── notice: Option<String>                 // blocking notice
//! └── status_message: String                 // help bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::ResolvedConfig;
use crate::core::form::{FormDraft, FormField};
use crate::core::prompt::DEFAULT_LANGUAGE;
use crate::inference::CompletionProvider;
use crate::leads::{FieldError, LeadCapture};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFlags {
    pub is_submitted: bool,
    pub show_results: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    NotSubmitted,
    AwaitingDispatch,
    ResultsVisible,
}

impl SubmissionFlags {
    pub fn phase(&self) -> SubmissionPhase {
        match (self.is_submitted, self.show_results) {
            (false, _) => SubmissionPhase::NotSubmitted,
            (true, false) => SubmissionPhase::AwaitingDispatch,
            (true, true) => SubmissionPhase::ResultsVisible,
        }
    }
}

/// What the lead-capture service said about the submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadCaptureState {
    pub submitting: bool,
    pub accepted: bool,
    pub errors: Vec<FieldError>,
    /// Transport or API failure with no field detail.
    pub failure: Option<String>,
}

impl LeadCaptureState {
    pub fn errors_for(&self, field: FormField) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter(|error| error.form_field() == Some(field))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportStatus {
    #[default]
    Idle,
    Streaming,
    Done,
    Failed(String),
}

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub lead_capture: Arc<dyn LeadCapture>,
    pub model_name: String,
    pub language: String,
    pub max_output_tokens: Option<u32>,
    pub draft: FormDraft,
    pub flags: SubmissionFlags,
    pub messages: Vec<ChatMessage>,
    pub lead: LeadCaptureState,
    pub report: ReportStatus,
    pub notice: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        lead_capture: Arc<dyn LeadCapture>,
        model_name: String,
    ) -> Self {
        Self {
            provider,
            lead_capture,
            model_name,
            language: DEFAULT_LANGUAGE.to_string(),
            max_output_tokens: None,
            draft: FormDraft::default(),
            flags: SubmissionFlags::default(),
            messages: Vec::new(),
            lead: LeadCaptureState::default(),
            report: ReportStatus::Idle,
            notice: None,
            status_message: String::from("Tab: seuraava kenttä · Ctrl+S: lähetä · Esc: lopeta"),
        }
    }

    pub fn from_config(
        provider: Arc<dyn CompletionProvider>,
        lead_capture: Arc<dyn LeadCapture>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut app = Self::new(provider, lead_capture, config.model_name.clone());
        app.language = config.language.clone();
        app.max_output_tokens = Some(config.max_output_tokens);
        app
    }

    /// Messages the report panel may show. User turns never leave this filter.
    pub fn assistant_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|message| message.role == Role::Assistant)
    }

    /// Appends to the trailing assistant message, creating it on the first chunk.
    pub fn append_assistant_chunk(&mut self, text: &str) {
        if let Some(last) = self.messages.last_mut()
            && last.role == Role::Assistant
        {
            last.content.push_str(text);
            return;
        }
        self.messages.push(ChatMessage::assistant(text.to_string()));
    }

    pub fn report_text(&self) -> String {
        self.assistant_messages()
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
