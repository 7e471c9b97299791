use super::*;
use axum::body::Body;
use axum::http::{Method, Request};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::assistant::replies::{GREETING, REPORT_MENU};
use crate::settings::{CONNECTION_MISSING_FIELDS, CONNECTION_OK, SAVED_MESSAGE};
use crate::state::test_helpers::test_app_state;

// =============================================================================
// HELPERS
// =============================================================================

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = call(app, Method::POST, "/api/chat/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_owned()
}

// =============================================================================
// CHAT
// =============================================================================

#[tokio::test]
async fn healthz_ok() {
    let app = app(test_app_state());
    let (status, _) = call(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn session_starts_with_greeting() {
    let app = app(test_app_state());
    let id = new_session(&app).await;

    let (status, body) = call(&app, Method::GET, &format!("/api/chat/sessions/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["role"], "assistant");
    assert_eq!(body["messages"][0]["content"], GREETING);
    assert_eq!(body["pending"], false);
}

#[tokio::test]
async fn unknown_session_is_404_with_error_body() {
    let app = app(test_app_state());
    let uri = format!("/api/chat/sessions/{}", uuid::Uuid::new_v4());

    let (status, body) = call(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_SESSION_NOT_FOUND");
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn message_gets_reply() {
    let app = app(test_app_state());
    let id = new_session(&app).await;
    let uri = format!("/api/chat/sessions/{id}/messages");

    let (status, body) = call(&app, Method::POST, &uri, Some(json!({ "content": "generate a report" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "reply");
    assert_eq!(body["message"]["content"], REPORT_MENU);
}

#[tokio::test]
async fn blank_message_is_400() {
    let app = app(test_app_state());
    let id = new_session(&app).await;
    let uri = format!("/api/chat/sessions/{id}/messages");

    let (status, body) = call(&app, Method::POST, &uri, Some(json!({ "content": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_EMPTY_MESSAGE");
}

#[tokio::test]
async fn email_flow_draft_then_confirm() {
    let app = app(test_app_state());
    let id = new_session(&app).await;

    let (_, body) = call(
        &app,
        Method::POST,
        &format!("/api/chat/sessions/{id}/messages"),
        Some(json!({ "content": "email the customer report to ops@shop.io as json" })),
    )
    .await;
    assert_eq!(body["kind"], "email_draft");
    let draft = body["draft"].clone();
    assert_eq!(draft["to"], "ops@shop.io");
    assert_eq!(draft["subject"], "Customers Report");
    assert_eq!(draft["attachments"][0], json!({ "type": "customers", "format": "json" }));

    let (status, body) =
        call(&app, Method::POST, &format!("/api/chat/sessions/{id}/email"), Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["success"], true);
    assert_eq!(body["outcome"]["simulated"], true);
    assert_eq!(body["message"]["attachments"], json!(["customers_report.json"]));
}

#[tokio::test]
async fn confirm_with_bad_recipient_is_400() {
    let app = app(test_app_state());
    let id = new_session(&app).await;
    let draft = json!({ "to": "nobody", "subject": "s", "body": "b", "attachments": [] });

    let (status, body) =
        call(&app, Method::POST, &format!("/api/chat/sessions/{id}/email"), Some(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_INVALID_RECIPIENT");
}

// =============================================================================
// REPORTS
// =============================================================================

#[tokio::test]
async fn report_catalog_lists_four_types() {
    let app = app(test_app_state());
    let (status, body) = call(&app, Method::GET, "/api/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = body.as_array().unwrap().iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(types, ["sales", "revenue", "performance", "customers"]);
}

#[tokio::test]
async fn generate_csv_report() {
    let app = app(test_app_state());
    let (status, body) =
        call(&app, Method::POST, "/api/reports", Some(json!({ "type": "sales", "format": "csv" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filename"], "sales_report.csv");
    assert_eq!(body["content_type"], "text/csv");
    assert!(body["content"].as_str().unwrap().starts_with("revenue,45000\norders,1200"));
}

// =============================================================================
// SETTINGS
// =============================================================================

#[tokio::test]
async fn integration_replace_toggle_and_test() {
    let app = app(test_app_state());
    let uri = "/api/settings/integrations/new_relic";

    let (status, _) = call(&app, Method::POST, &format!("{uri}/test"), None).await;
    assert_eq!(status, StatusCode::OK);

    let config = json!({ "service": "new_relic", "api_key": "k", "account_id": "42" });
    let (status, body) = call(&app, Method::PUT, uri, Some(config)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "US");

    let (_, body) = call(&app, Method::PATCH, uri, Some(json!({ "enabled": true }))).await;
    assert_eq!(body["enabled"], true);

    let (_, body) = call(&app, Method::POST, &format!("{uri}/test"), None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], CONNECTION_OK);

    let (_, body) = call(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(body["new_relic"]["account_id"], "42");
}

#[tokio::test]
async fn incomplete_integration_fails_test() {
    let app = app(test_app_state());
    let (_, body) = call(&app, Method::POST, "/api/settings/integrations/jira/test", None).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], CONNECTION_MISSING_FIELDS);
}

#[tokio::test]
async fn unknown_service_is_404_and_mismatch_is_400() {
    let app = app(test_app_state());

    let (status, body) = call(&app, Method::POST, "/api/settings/integrations/splunk/test", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_UNKNOWN_SERVICE");

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/settings/integrations/jira",
        Some(json!({ "service": "tableau" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_SERVICE_MISMATCH");
}

#[tokio::test]
async fn webhook_lifecycle() {
    let app = app(test_app_state());

    let (_, events) = call(&app, Method::GET, "/api/settings/webhooks/events", None).await;
    assert_eq!(events.as_array().unwrap().len(), 7);

    let (status, hook) = call(&app, Method::POST, "/api/settings/webhooks", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/settings/webhooks/{}", hook["id"].as_str().unwrap());

    let patch = json!({ "name": "Orders", "url": "https://hooks.example.com/o", "events": ["order.created"] });
    let (status, hook) = call(&app, Method::PATCH, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hook["events"], json!(["order.created"]));

    let (status, body) = call(&app, Method::PATCH, &uri, Some(json!({ "events": ["order.shipped"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_UNKNOWN_WEBHOOK_EVENT");

    let (_, body) = call(&app, Method::POST, &format!("{uri}/test"), None).await;
    assert_eq!(body["success"], true);

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_acknowledges() {
    let app = app(test_app_state());
    let (status, body) = call(&app, Method::POST, "/api/settings/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], SAVED_MESSAGE);
}
