//! # Prompt Composition
//!
//! Turns a validated [`FormDraft`] into the single instruction string sent to
//! the chat-completion service.
//!
//! ```text
//! <preamble, target language>
//!
//! My company: <company_name>
//! Services or products for keyword research:
//! - <service 1>
//! - <service 2>
//! Specifications: <guidelines>
//! ```

use crate::core::form::FormDraft;

/// Report language used when config does not name one.
pub const DEFAULT_LANGUAGE: &str = "Finnish";

const PREAMBLE: &str =
    "Your job is to generate a keyword list based on the company's services or products. \
    Create a professional-looking keyword research report based on the message the user submits. \
    Focus on keywords and at the end give 3 tips how to use keywords. \
    Keep any other text minimal. \
    Keep the text style passive and professional.";

/// Render the newline-delimited services field as a dash list.
///
/// Lines are trimmed and blank lines are dropped, so `"A\n\nB"` yields `"- A\n- B"`.
pub fn bullet_list(services: &str) -> String {
    services
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full prompt. Company name and guidelines are inserted verbatim.
pub fn build_prompt(draft: &FormDraft, language: &str) -> String {
    format!(
        "{PREAMBLE} Default language: {language}.\n\n\
         My company: {company}\n\
         Services or products for keyword research:\n\
         {services}\n\
         Specifications: {guidelines}",
        company = draft.company_name,
        services = bullet_list(&draft.services),
        guidelines = draft.guidelines,
    )
}
