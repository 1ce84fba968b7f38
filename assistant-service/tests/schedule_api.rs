//! Integration tests for `POST /api/upload-schedule`.

mod common;

use assistant_service::services::providers::mock::MockCompletionProvider;
use assistant_service::services::schedule::ANALYSIS_FALLBACK;
use axum::body::Body;
use axum::http::{Request, header};
use common::{app, send};
use std::sync::Arc;

const BOUNDARY: &str = "test-boundary-4bf0e1c9";

fn upload_request(field_name: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"schedule.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/api/upload-schedule")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}

#[tokio::test]
async fn valid_csv_returns_analysis() {
    let completion = Arc::new(MockCompletionProvider::replying(
        "Looks busy.\n\n| ID | Risk |\n|----|------|\n| R1 | Overlap |",
    ));
    let (status, body) = send(
        app(Some(completion.clone()), None),
        upload_request("schedule", "name,shift\nana,night\nbo,day\n"),
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["analysis"].as_str().unwrap().contains("| R1 |"));

    let requests = completion.requests();
    assert_eq!(requests.len(), 1);
    let user_content = &requests[0].messages[1].content;
    assert!(user_content.contains("name,shift\nana,night\nbo,day"));
    assert!(requests[0].temperature < 0.5);
}

#[tokio::test]
async fn cell_sanitization_reaches_the_prompt() {
    let completion = Arc::new(MockCompletionProvider::replying("ok"));
    let (status, _body) = send(
        app(Some(completion.clone()), None),
        upload_request(
            "schedule",
            "name,notes\nana,\"on call, may rotate\nsecond line\"\n",
        ),
    )
    .await;

    assert_eq!(status, 200);
    let user_content = &completion.requests()[0].messages[1].content;
    assert!(user_content.contains("ana,on call; may rotate second line"));
}

#[tokio::test]
async fn header_only_csv_is_rejected() {
    let completion = Arc::new(MockCompletionProvider::replying("unused"));
    let (status, body) = send(
        app(Some(completion), None),
        upload_request("schedule", "name,shift\n"),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("no data rows"));
}

#[tokio::test]
async fn malformed_csv_is_rejected() {
    let completion = Arc::new(MockCompletionProvider::replying("unused"));
    let (status, body) = send(
        app(Some(completion), None),
        upload_request("schedule", "a,b\n1,2,3\n"),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("parse"));
}

#[tokio::test]
async fn missing_schedule_field_is_rejected() {
    let completion = Arc::new(MockCompletionProvider::replying("unused"));
    let (status, body) = send(
        app(Some(completion), None),
        upload_request("attachment", "name,shift\nana,night\n"),
    )
    .await;

    assert_eq!(status, 400);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("No schedule file uploaded")
    );
}

#[tokio::test]
async fn missing_completion_credential_is_a_500() {
    let (status, body) = send(
        app(None, None),
        upload_request("schedule", "name,shift\nana,night\n"),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Configuration error");
}

#[tokio::test]
async fn upstream_failure_surfaces_raw_body() {
    let completion = Arc::new(MockCompletionProvider::failing("model_overloaded"));
    let (status, body) = send(
        app(Some(completion), None),
        upload_request("schedule", "name,shift\nana,night\n"),
    )
    .await;

    assert_eq!(status, 500);
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("model_overloaded")
    );
}

#[tokio::test]
async fn empty_analysis_text_falls_back() {
    let completion = Arc::new(MockCompletionProvider::empty());
    let (status, body) = send(
        app(Some(completion), None),
        upload_request("schedule", "name,shift\nana,night\n"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["analysis"], ANALYSIS_FALLBACK);
}
