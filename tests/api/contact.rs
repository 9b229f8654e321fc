use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_contact_body, TestApp};

fn mock_email_success() -> Mock {
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
}

#[tokio::test]
async fn contact_returns_200_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    mock_email_success().mount(&test_app.email_server).await;

    let response = test_app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Body is not valid JSON.");

    assert_eq!(body["success"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn contact_accepts_form_encoded_bodies() {
    let test_app = TestApp::spawn_app().await;

    mock_email_success().mount(&test_app.email_server).await;

    let response = test_app.post_contact_form(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_sends_exactly_one_notification_email() {
    let test_app = TestApp::spawn_app().await;

    mock_email_success()
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    test_app.post_contact(valid_contact_body()).await;
}

#[tokio::test]
async fn contact_returns_400_when_a_field_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(HashMap<&str, &str>, &str)> = vec![
        (
            {
                let mut body = valid_contact_body();
                body.insert("email", "not-an-email");
                body
            },
            "invalid email parameter",
        ),
        (
            {
                let mut body = valid_contact_body();
                body.insert("name", "James the 3rd");
                body
            },
            "name with digits",
        ),
        (
            {
                let mut body = valid_contact_body();
                body.insert("message", "too short");
                body
            },
            "message shorter than 10 characters",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_contact(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );

        let body: Value = response.json().await.expect("Body is not valid JSON.");

        assert_eq!(body["success"], false);
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn contact_returns_400_with_one_error_per_missing_field() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_contact(HashMap::new()).await;

    assert_eq!(400, response.status().as_u16());

    let body: Value = response.json().await.expect("Body is not valid JSON.");
    let errors = body["errors"].as_array().unwrap();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], "Name is required");
    assert_eq!(errors[1], "Email is required");
    assert_eq!(errors[2], "Message is required");
}

#[tokio::test]
async fn contact_enforces_the_message_length_boundary() {
    let test_app = TestApp::spawn_app().await;

    mock_email_success().mount(&test_app.email_server).await;

    let nine_chars = "a".repeat(9);
    let ten_chars = "a".repeat(10);
    let two_thousand_chars = "a".repeat(2000);
    let too_long = "a".repeat(2001);

    let test_cases: Vec<(&str, u16)> = vec![
        (nine_chars.as_str(), 400),
        (ten_chars.as_str(), 200),
        (two_thousand_chars.as_str(), 200),
        (too_long.as_str(), 400),
    ];

    for (message, expected_status) in test_cases {
        let mut body = valid_contact_body();
        body.insert("message", message);

        let response = test_app.post_contact(body).await;

        assert_eq!(
            expected_status,
            response.status().as_u16(),
            "Unexpected status for a message of {} characters",
            message.len()
        );
    }
}

#[tokio::test]
async fn contact_returns_500_with_a_generic_message_when_the_provider_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("smtp relay auth failure detail"))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(valid_contact_body()).await;

    assert_eq!(500, response.status().as_u16());

    let body: Value = response.json().await.expect("Body is not valid JSON.");

    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Sorry, something went wrong on our end. Please try again later."
    );
    // Provider detail must never reach the client
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn contact_returns_429_on_the_sixth_request_in_the_window() {
    let test_app = TestApp::spawn_app_with_rate_limit(5).await;

    mock_email_success().mount(&test_app.email_server).await;

    for _ in 0..5 {
        let response = test_app.post_contact(valid_contact_body()).await;

        assert_eq!(200, response.status().as_u16());
    }

    let response = test_app.post_contact(valid_contact_body()).await;

    assert_eq!(429, response.status().as_u16());
    assert!(response.headers().contains_key("Retry-After"));

    let window_secs = test_app.config.get_rate_limit().window_secs;
    let body: Value = response.json().await.expect("Body is not valid JSON.");

    assert_eq!(body["success"], false);
    assert!(body["retryAfter"].as_u64().unwrap() <= window_secs);
}

#[tokio::test]
async fn contact_rejects_invalid_submissions_before_counting_them() {
    let test_app = TestApp::spawn_app_with_rate_limit(5).await;

    mock_email_success().mount(&test_app.email_server).await;

    // Invalid submissions never reach the limiter, so a full window of them
    // does not lock the client out.
    for _ in 0..6 {
        let mut body = valid_contact_body();
        body.insert("email", "not-an-email");

        let response = test_app.post_contact(body).await;

        assert_eq!(400, response.status().as_u16());
    }

    let response = test_app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn get_contact_keeps_the_same_shape_regardless_of_post_history() {
    let test_app = TestApp::spawn_app().await;

    mock_email_success().mount(&test_app.email_server).await;

    let before: Value = test_app
        .get_contact()
        .await
        .json()
        .await
        .expect("Body is not valid JSON.");

    test_app.post_contact(valid_contact_body()).await;

    let after: Value = test_app
        .get_contact()
        .await
        .json()
        .await
        .expect("Body is not valid JSON.");

    assert_eq!(before["success"], after["success"]);
    assert_eq!(before["message"], after["message"]);
    assert_eq!(before["message"], "Contact endpoint is working");
    assert!(after["timestamp"].is_string());
}
