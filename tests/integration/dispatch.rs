//! End-to-end dispatch pipeline tests

use http::StatusCode;
use serde_json::{json, Value};

use mvc_core::Request;

use crate::helpers::*;

/// Requests with no routing parameters fall back to Home/index.
#[test]
fn test_default_route_renders_home_index() {
    let app = TestApp::new();
    let response = app.dispatch(&Request::builder().method("GET").build());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(&response), "<h1>Welcome</h1><p>hello</p>");
    assert!(response.is_ended());
}

/// Controller and action parameters are matched case-insensitively.
#[test]
fn test_route_params_case_insensitive() {
    let app = TestApp::new();
    let response = app.get("HOME", "Index");
    assert_eq!(body_text(&response), "<h1>Welcome</h1><p>hello</p>");
}

/// A view result with a layout renders the view inside the layout.
#[test]
fn test_layout_wraps_rendered_view() {
    let app = TestApp::new();
    let response = app.get("Home", "wrapped");

    assert_eq!(
        body_text(&response),
        "<html><title>Wrapped</title><body><p>inside</p></body></html>"
    );
}

/// A payload with no matching view file is serialized as JSON.
#[test]
fn test_json_fallback_when_no_view() {
    let app = TestApp::new();
    let response = app.get("Api", "list");

    assert_eq!(response.content_type(), Some("application/json"));
    let body: Value = serde_json::from_slice(response.body()).expect("invalid JSON");
    assert_eq!(body, json!([1, 2, 3]));
}

/// An unknown route produces a 404 without reaching any handler.
#[test]
fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let response = app.get("Ghost", "index");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(&response), "Not Found");
}

/// A failed action is captured in the model state and the view still
/// renders, exposing the failure through the exception placeholder.
#[test]
fn test_action_error_is_rendered_not_fatal() {
    let app = TestApp::new();
    let response = app.get("Home", "fail");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(&response).starts_with("error: "));
    assert!(body_text(&response).contains("database unreachable"));
}

/// A status-code result short-circuits the view pipeline.
#[test]
fn test_status_code_result() {
    let app = TestApp::new();
    let response = app.get("Home", "gone");

    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(response.status_description(), Some("Gone"));
    assert_eq!(body_text(&response), "Gone");
}

/// POST form parameters are bound into the model handed to the action.
#[test]
fn test_post_binds_form_model() {
    let app = TestApp::new();
    let response = app.post("Account", "create", &[("name", "Ada"), ("role", "admin")]);

    assert_eq!(response.content_type(), Some("application/json"));
    let body: Value = serde_json::from_slice(response.body()).expect("invalid JSON");
    assert_eq!(body["name"], json!("Ada"));
    assert_eq!(body["role"], json!("admin"));
}

/// GET requests never bind a model, even with form data present.
#[test]
fn test_get_binds_no_model() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("GET")
        .query("controller", "Account")
        .query("action", "create")
        .form("name", "Ada")
        .build();
    let response = app.dispatch(&request);

    let body: Value = serde_json::from_slice(response.body()).expect("invalid JSON");
    assert_eq!(body, Value::Null);
}
