use keyscout::core::form::{FormDraft, FormField};
use keyscout::leads::{FormspreeClient, LeadCapture, LeadError, LeadOutcome};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn acme_record() -> FormDraft {
    FormDraft {
        company_name: "Acme".to_string(),
        email: "a@b.com".to_string(),
        services: "Web design\nSEO".to_string(),
        guidelines: "Region: South".to_string(),
        cookie_consent: true,
    }
}

#[tokio::test]
async fn test_accepted_submission_posts_camel_case_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/f/test-form"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "companyName": "Acme",
            "email": "a@b.com",
            "services": "Web design\nSEO",
            "guidelines": "Region: South",
            "cookieConsent": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"next": "/thanks", "ok": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FormspreeClient::new("test-form".to_string(), Some(mock_server.uri()));
    let outcome = client.submit(&acme_record()).await.unwrap();

    assert_eq!(outcome, LeadOutcome::Accepted);
}

#[tokio::test]
async fn test_validation_errors_are_rejected_per_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/f/test-form"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "Validation errors",
            "errors": [
                {"code": "TYPE_EMAIL", "field": "email", "message": "should be an email"},
                {"code": "REQUIRED_FIELD_MISSING", "field": "companyName", "message": "is required"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = FormspreeClient::new("test-form".to_string(), Some(mock_server.uri()));
    let outcome = client.submit(&acme_record()).await.unwrap();

    let LeadOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection, got {:?}", outcome);
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].form_field(), Some(FormField::Email));
    assert_eq!(errors[0].display_text(), "Sähköposti: should be an email");
    assert_eq!(errors[1].form_field(), Some(FormField::CompanyName));
}

#[tokio::test]
async fn test_server_error_without_field_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/f/test-form"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = FormspreeClient::new("test-form".to_string(), Some(mock_server.uri()));
    let result = client.submit(&acme_record()).await;

    match result {
        Err(LeadError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_form_level_error_message_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/f/unknown-form"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Form not found"})))
        .mount(&mock_server)
        .await;

    let client = FormspreeClient::new("unknown-form".to_string(), Some(mock_server.uri()));
    let result = client.submit(&acme_record()).await;

    assert!(matches!(
        result,
        Err(LeadError::Api { status: 404, ref message }) if message == "Form not found"
    ));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Nothing listens on the discard port
    let client =
        FormspreeClient::new("test-form".to_string(), Some("http://127.0.0.1:9".to_string()));
    let result = client.submit(&acme_record()).await;

    assert!(matches!(result, Err(LeadError::Network(_))));
}
