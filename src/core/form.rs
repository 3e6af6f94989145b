//! # Lead Form
//!
//! The draft the user fills in, plus the local validation that gates a submit.
//!
//! ```text
//! FormDraft
//! ├── company_name: String   (required)
//! ├── email: String          (required)
//! ├── services: String       (required, one service per line)
//! ├── guidelines: String     (optional free text)
//! └── cookie_consent: bool   (must be true)
//! ```
//!
//! The draft doubles as the record sent to the lead-capture endpoint, so it
//! serializes with the endpoint's camelCase field names.

use serde::Serialize;
use std::fmt;

/// Blocking notice shown when the form is incomplete.
pub const INCOMPLETE_FORM_NOTICE: &str = "Täytä vaadittavat kohdat ja hyväksy markkinointilupa";

/// One control on the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CompanyName,
    Email,
    Services,
    Guidelines,
    CookieConsent,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::CompanyName,
        FormField::Email,
        FormField::Services,
        FormField::Guidelines,
        FormField::CookieConsent,
    ];

    /// Wire name used by the lead-capture endpoint.
    pub fn key(self) -> &'static str {
        match self {
            FormField::CompanyName => "companyName",
            FormField::Email => "email",
            FormField::Services => "services",
            FormField::Guidelines => "guidelines",
            FormField::CookieConsent => "cookieConsent",
        }
    }

    pub fn from_key(key: &str) -> Option<FormField> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::CompanyName => "Yrityksen nimi",
            FormField::Email => "Sähköposti",
            FormField::Services => "Lista tuotteista tai palveluistasi",
            FormField::Guidelines => "Tarkennukset",
            FormField::CookieConsent => {
                "Hyväksyn, että saan avainsanatutkimuksen tulokset sähköpostiini."
            }
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::CompanyName => "Yrityksen nimi",
            FormField::Email => "Sähköposti",
            FormField::Services => "Esim. Autohuolto, kolarikorjaus, lasien tummennukset",
            FormField::Guidelines => "Esim. Toimialue Satakunta",
            FormField::CookieConsent => "",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Guidelines)
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::Services | FormField::Guidelines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub company_name: String,
    pub email: String,
    pub services: String,
    pub guidelines: String,
    pub cookie_consent: bool,
}

impl FormDraft {
    /// Replace the text of a field. The consent checkbox has no text and is ignored.
    pub fn set_text(&mut self, field: FormField, value: String) {
        match field {
            FormField::CompanyName => self.company_name = value,
            FormField::Email => self.email = value,
            FormField::Services => self.services = value,
            FormField::Guidelines => self.guidelines = value,
            FormField::CookieConsent => {}
        }
    }

    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::CompanyName => &self.company_name,
            FormField::Email => &self.email,
            FormField::Services => &self.services,
            FormField::Guidelines => &self.guidelines,
            FormField::CookieConsent => "",
        }
    }

    /// Required controls that are blank (whitespace counts as blank) or unchecked.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .filter(|&f| match f {
                FormField::CookieConsent => !self.cookie_consent,
                other => self.text(other).trim().is_empty(),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

/// Local validation failure: the submit is refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{INCOMPLETE_FORM_NOTICE}")
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> FormDraft {
        FormDraft {
            company_name: "Acme".to_string(),
            email: "a@b.com".to_string(),
            services: "Web design\nSEO".to_string(),
            guidelines: String::new(),
            cookie_consent: true,
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert_eq!(complete_draft().validate(), Ok(()));
    }

    #[test]
    fn guidelines_are_optional() {
        let draft = complete_draft();
        assert!(draft.guidelines.is_empty());
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let err = FormDraft::default().validate().unwrap_err();
        assert_eq!(
            err.missing,
            vec![
                FormField::CompanyName,
                FormField::Email,
                FormField::Services,
                FormField::CookieConsent,
            ]
        );
        assert_eq!(err.to_string(), INCOMPLETE_FORM_NOTICE);
    }

    #[test]
    fn whitespace_only_text_is_missing() {
        let mut draft = complete_draft();
        draft.services = "  \n \t".to_string();
        assert_eq!(draft.missing_fields(), vec![FormField::Services]);
    }

    #[test]
    fn unchecked_consent_is_missing() {
        let mut draft = complete_draft();
        draft.cookie_consent = false;
        assert_eq!(draft.missing_fields(), vec![FormField::CookieConsent]);
    }

    #[test]
    fn set_text_ignores_checkbox() {
        let mut draft = FormDraft::default();
        draft.set_text(FormField::Email, "x@y.fi".to_string());
        draft.set_text(FormField::CookieConsent, "true".to_string());
        assert_eq!(draft.text(FormField::Email), "x@y.fi");
        assert!(!draft.cookie_consent);
    }

    #[test]
    fn field_keys_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("phone"), None);
    }

    #[test]
    fn draft_serializes_with_endpoint_field_names() {
        let json = serde_json::to_value(complete_draft()).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["services"], "Web design\nSEO");
        assert_eq!(json["guidelines"], "");
        assert_eq!(json["cookieConsent"], true);
    }
}
