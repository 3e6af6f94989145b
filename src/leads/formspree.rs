//! Formspree lead-capture client.
//!
//! `POST {base_url}/f/{form_id}` with `Accept: application/json` and the form
//! record as a JSON body. Formspree answers:
//! - 2xx `{"ok": true, "next": "..."}` when the submission is stored
//! - 4xx `{"error": "...", "errors": [{"field", "code", "message"}]}` on validation failure

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::form::FormDraft;
use crate::leads::{FieldError, LeadCapture, LeadError, LeadOutcome};

pub const DEFAULT_FORMSPREE_BASE_URL: &str = "https://formspree.io";

#[derive(Deserialize, Debug, Default)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

pub struct FormspreeClient {
    form_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl FormspreeClient {
    pub fn new(form_id: String, base_url: Option<String>) -> Self {
        Self {
            form_id,
            base_url: base_url.unwrap_or_else(|| DEFAULT_FORMSPREE_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/f/{}", self.base_url.trim_end_matches('/'), self.form_id)
    }
}

#[async_trait]
impl LeadCapture for FormspreeClient {
    fn name(&self) -> &str {
        "formspree"
    }

    async fn submit(&self, record: &FormDraft) -> Result<LeadOutcome, LeadError> {
        info!("Submitting lead to form {}", self.form_id);

        let response = self
            .client
            .post(self.endpoint())
            .header("Accept", "application/json")
            .json(record)
            .send()
            .await
            .map_err(|e| LeadError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Formspree response status: {}", status);

        if status.is_success() {
            info!("Lead accepted");
            return Ok(LeadOutcome::Accepted);
        }

        let body = response
            .text()
            .await
            .map_err(|e| LeadError::Network(e.to_string()))?;

        let parsed: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
        if !parsed.errors.is_empty() {
            warn!(
                "Lead rejected with {} validation error(s): {:?}",
                parsed.errors.len(),
                parsed.errors
            );
            return Ok(LeadOutcome::Rejected(parsed.errors));
        }

        let message = parsed.error.unwrap_or(body);
        warn!("Formspree error: {} - {}", status.as_u16(), message);
        Err(LeadError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
