//! # Actions
//!
//! Everything that can happen on the page becomes an `Action`.
//! User presses Ctrl+S? That's `Action::Submit`.
//! The chat service streams text? That's `Action::ReportChunk(text)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the event loop should
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::form::{FormDraft, FormField};
use crate::core::prompt::build_prompt;
use crate::core::state::{App, ChatMessage, ReportStatus};
use crate::leads::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditField(FormField, String),
    ToggleConsent,
    Submit,
    DismissNotice,
    /// The chat request has been handed to the provider.
    ReportDispatched,
    ReportChunk(String),
    ReportDone,
    ReportFailed(String),
    LeadAccepted,
    LeadRejected(Vec<FieldError>),
    LeadFailed(String),
    Quit,
}

/// I/O requested by `update()`, carried out by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Send `record` to lead capture and `prompt` to the chat service.
    Dispatch { prompt: String, record: FormDraft },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::EditField(field, value) => {
            if app.flags.is_submitted {
                return Effect::None;
            }
            app.draft.set_text(field, value);
            Effect::None
        }
        Action::ToggleConsent => {
            if app.flags.is_submitted {
                return Effect::None;
            }
            app.draft.cookie_consent = !app.draft.cookie_consent;
            Effect::None
        }
        Action::Submit => submit(app),
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::ReportDispatched => {
            app.flags.show_results = true;
            app.report = ReportStatus::Streaming;
            app.status_message = String::from("Luodaan avainsanatutkimusta...");
            Effect::None
        }
        Action::ReportChunk(text) => {
            app.append_assistant_chunk(&text);
            Effect::None
        }
        Action::ReportDone => {
            if app.report == ReportStatus::Streaming {
                app.report = ReportStatus::Done;
            }
            app.status_message = String::from("Valmis · Esc: lopeta");
            Effect::None
        }
        Action::ReportFailed(reason) => {
            warn!("Report failed: {}", reason);
            app.report = ReportStatus::Failed(reason);
            app.status_message = String::from("Virhe · Esc: lopeta");
            Effect::None
        }
        Action::LeadAccepted => {
            app.lead.submitting = false;
            app.lead.accepted = true;
            Effect::None
        }
        Action::LeadRejected(errors) => {
            app.lead.submitting = false;
            app.lead.accepted = false;
            app.lead.errors = errors;
            Effect::None
        }
        Action::LeadFailed(reason) => {
            app.lead.submitting = false;
            app.lead.failure = Some(reason);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App) -> Effect {
    if app.flags.is_submitted {
        debug!("Submit ignored: already submitted");
        return Effect::None;
    }

    if let Err(e) = app.draft.validate() {
        info!("Submit blocked, missing: {:?}", e.missing);
        app.notice = Some(e.to_string());
        return Effect::None;
    }

    let prompt = build_prompt(&app.draft, &app.language);
    info!("Submitting form (prompt_len={})", prompt.len());

    app.messages.push(ChatMessage::user(prompt.clone()));
    app.flags.is_submitted = true;
    app.lead.submitting = true;
    app.notice = None;

    Effect::Dispatch {
        prompt,
        record: app.draft.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::INCOMPLETE_FORM_NOTICE;
    use crate::core::state::{Role, SubmissionFlags, SubmissionPhase};
    use crate::test_support::test_app;

    fn fill(app: &mut App, company: &str, email: &str, services: &str, guidelines: &str) {
        update(app, Action::EditField(FormField::CompanyName, company.to_string()));
        update(app, Action::EditField(FormField::Email, email.to_string()));
        update(app, Action::EditField(FormField::Services, services.to_string()));
        update(app, Action::EditField(FormField::Guidelines, guidelines.to_string()));
    }

    fn valid_app() -> App {
        let mut app = test_app();
        fill(&mut app, "Acme", "a@b.com", "Web design\nSEO", "Region: South");
        update(&mut app, Action::ToggleConsent);
        app
    }

    #[test]
    fn edit_field_updates_draft() {
        let mut app = test_app();
        update(&mut app, Action::EditField(FormField::Email, "x@y.fi".to_string()));
        assert_eq!(app.draft.email, "x@y.fi");
    }

    #[test]
    fn toggle_consent_flips() {
        let mut app = test_app();
        update(&mut app, Action::ToggleConsent);
        assert!(app.draft.cookie_consent);
        update(&mut app, Action::ToggleConsent);
        assert!(!app.draft.cookie_consent);
    }

    #[test]
    fn incomplete_forms_block_submission() {
        let cases: Vec<Box<dyn Fn(&mut App)>> = vec![
            Box::new(|app| {
                update(app, Action::EditField(FormField::CompanyName, String::new()));
            }),
            Box::new(|app| {
                update(app, Action::EditField(FormField::Email, String::new()));
            }),
            Box::new(|app| {
                update(app, Action::EditField(FormField::Services, "  ".to_string()));
            }),
            Box::new(|app| {
                update(app, Action::ToggleConsent);
            }),
        ];

        for break_form in cases {
            let mut app = valid_app();
            break_form(&mut app);

            let effect = update(&mut app, Action::Submit);

            assert_eq!(effect, Effect::None);
            assert_eq!(app.flags, SubmissionFlags::default());
            assert!(app.messages.is_empty());
            assert!(!app.lead.submitting);
            assert_eq!(app.notice.as_deref(), Some(INCOMPLETE_FORM_NOTICE));
        }
    }

    #[test]
    fn guidelines_are_optional() {
        let mut app = test_app();
        fill(&mut app, "Acme", "a@b.com", "SEO", "");
        update(&mut app, Action::ToggleConsent);
        assert!(matches!(update(&mut app, Action::Submit), Effect::Dispatch { .. }));
    }

    #[test]
    fn dismiss_notice_clears_it() {
        let mut app = test_app();
        update(&mut app, Action::Submit);
        assert!(app.notice.is_some());
        update(&mut app, Action::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn end_to_end_acme_submission() {
        let mut app = valid_app();

        let effect = update(&mut app, Action::Submit);
        let Effect::Dispatch { prompt, record } = effect else {
            panic!("expected dispatch, got {effect:?}");
        };

        assert!(prompt.contains("My company: Acme"));
        assert!(prompt.contains("- Web design"));
        assert!(prompt.contains("- SEO"));
        assert!(prompt.contains("Specifications: Region: South"));
        assert_eq!(record, app.draft);

        assert!(app.flags.is_submitted);
        assert!(!app.flags.show_results);
        assert_eq!(app.flags.phase(), SubmissionPhase::AwaitingDispatch);
        assert!(app.lead.submitting);

        update(&mut app, Action::ReportDispatched);
        assert!(app.flags.show_results);
        assert_eq!(app.flags.phase(), SubmissionPhase::ResultsVisible);
        assert_eq!(app.report, ReportStatus::Streaming);
    }

    #[test]
    fn prompt_is_echoed_as_user_message() {
        let mut app = valid_app();
        let Effect::Dispatch { prompt, .. } = update(&mut app, Action::Submit) else {
            panic!("expected dispatch");
        };
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, Role::User);
        assert_eq!(app.messages[0].content, prompt);
    }

    #[test]
    fn second_submit_is_ignored() {
        let mut app = valid_app();
        assert!(matches!(update(&mut app, Action::Submit), Effect::Dispatch { .. }));
        update(&mut app, Action::ReportDispatched);

        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn edits_after_submit_are_ignored() {
        let mut app = valid_app();
        update(&mut app, Action::Submit);
        update(&mut app, Action::EditField(FormField::CompanyName, "Other".to_string()));
        update(&mut app, Action::ToggleConsent);
        assert_eq!(app.draft.company_name, "Acme");
        assert!(app.draft.cookie_consent);
    }

    #[test]
    fn report_chunks_build_assistant_message() {
        let mut app = valid_app();
        update(&mut app, Action::Submit);
        update(&mut app, Action::ReportDispatched);
        update(&mut app, Action::ReportChunk("# Avain".to_string()));
        update(&mut app, Action::ReportChunk("sanat".to_string()));
        update(&mut app, Action::ReportDone);

        assert_eq!(app.report, ReportStatus::Done);
        assert_eq!(app.report_text(), "# Avainsanat");
    }

    #[test]
    fn report_failure_keeps_partial_text() {
        let mut app = valid_app();
        update(&mut app, Action::Submit);
        update(&mut app, Action::ReportDispatched);
        update(&mut app, Action::ReportChunk("partial".to_string()));
        update(&mut app, Action::ReportFailed("HTTP 503".to_string()));

        assert_eq!(app.report, ReportStatus::Failed("HTTP 503".to_string()));
        assert_eq!(app.report_text(), "partial");
    }

    #[test]
    fn done_after_failure_keeps_failure() {
        let mut app = valid_app();
        update(&mut app, Action::ReportFailed("boom".to_string()));
        update(&mut app, Action::ReportDone);
        assert_eq!(app.report, ReportStatus::Failed("boom".to_string()));
    }

    #[test]
    fn lead_outcomes_update_capture_state() {
        let mut app = valid_app();
        update(&mut app, Action::Submit);
        update(&mut app, Action::LeadAccepted);
        assert!(app.lead.accepted);
        assert!(!app.lead.submitting);

        let mut app = valid_app();
        update(&mut app, Action::Submit);
        let errors = vec![FieldError {
            field: Some("email".to_string()),
            code: Some("TYPE_EMAIL".to_string()),
            message: "should be an email".to_string(),
        }];
        update(&mut app, Action::LeadRejected(errors.clone()));
        assert_eq!(app.lead.errors, errors);
        assert!(!app.lead.accepted);

        let mut app = valid_app();
        update(&mut app, Action::Submit);
        update(&mut app, Action::LeadFailed("network error".to_string()));
        assert_eq!(app.lead.failure.as_deref(), Some("network error"));
        assert!(!app.lead.submitting);
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
