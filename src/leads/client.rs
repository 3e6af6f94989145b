use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::form::{FormDraft, FormField};

/// Errors that can occur while submitting a lead.
#[derive(Debug)]
pub enum LeadError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint refused the submission without field-level detail.
    Api { status: u16, message: String },
    /// Failed to parse the endpoint's response.
    Parse(String),
}

impl fmt::Display for LeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadError::Network(msg) => write!(f, "network error: {msg}"),
            LeadError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            LeadError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LeadError {}

/// One validation message from the lead-capture endpoint.
///
/// `field` is the endpoint's field key; `None` means the error applies to the
/// whole form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl FieldError {
    /// The form control this error belongs to, if the key is one of ours.
    pub fn form_field(&self) -> Option<FormField> {
        self.field.as_deref().and_then(FormField::from_key)
    }

    /// Message prefixed with the field label, e.g. `Sähköposti: should be an email`.
    pub fn display_text(&self) -> String {
        match self.form_field() {
            Some(field) => format!("{}: {}", field.label(), self.message),
            None => self.message.clone(),
        }
    }
}

/// Result of a completed submission round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Accepted,
    Rejected(Vec<FieldError>),
}

#[async_trait]
pub trait LeadCapture: Send + Sync {
    /// Returns the name of the service.
    fn name(&self) -> &str;

    /// Submits the raw form record.
    async fn submit(&self, record: &FormDraft) -> Result<LeadOutcome, LeadError>;
}
