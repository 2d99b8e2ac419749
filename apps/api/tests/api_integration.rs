//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP flows including:
//! - The analysis form page
//! - Form submission through the crew pipeline
//! - The JSON analysis endpoint
//! - Upstream failure reporting

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{RecordingSearch, ScriptedModel};
use healthcrew_api::agents::{CrewSettings, HealthCrew};
use healthcrew_api::api::{self, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application with a scripted model
fn setup_app(llm: ScriptedModel) -> Router {
    let crew = HealthCrew::new(
        Arc::new(llm),
        Arc::new(RecordingSearch::new()),
        CrewSettings::default(),
    );
    api::router(AppState::new(crew))
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analysis")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_index_serves_form() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<form method="post" action="/analyze">"#));
    assert!(html.contains("Select your gender"));
    assert!(!html.contains(r#"id="output""#));
}

#[tokio::test]
async fn test_form_submission_renders_result() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(form_request("age=45&gender=Male&disease=no"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<div id="output">"#));
    assert!(html.contains("Advice from Fitness Expert"));
    assert!(html.contains("Advice from Doctor"));
    assert!(html.contains("disease: no"));
    assert!(html.contains(r#"<option value="Male" selected>Male</option>"#));
}

#[tokio::test]
async fn test_form_with_disease_runs_disease_expert() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(form_request("age=30&gender=Female&disease=Yes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Advice from Disease Expert"));
    assert!(!html.contains("disease: Yes"));
}

#[tokio::test]
async fn test_form_with_invalid_age() {
    let llm = ScriptedModel::new();
    let app = setup_app(llm);

    let response = app
        .oneshot(form_request("age=old&gender=Male&disease=no"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("Age must be a number"));
}

#[tokio::test]
async fn test_form_upstream_failure() {
    let app = setup_app(ScriptedModel::failing_on(1));

    let response = app
        .oneshot(form_request("age=45&gender=Male&disease=no"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_string(response).await;
    assert!(html.contains(r#"class="error""#));
    assert!(html.contains("Upstream service failed"));
}

#[tokio::test]
async fn test_json_analysis() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(json_request(&json!({
            "age": 30,
            "gender": "Female",
            "disease": "Yes"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert!(json["run_id"].is_string());
    assert!(json["generated_at"].is_string());
    assert_eq!(json["disease_branch"], true);
    assert_eq!(json["task_count"], 4);
    assert!(json["result"]
        .as_str()
        .unwrap()
        .ends_with("Advice from Disease Expert"));
}

#[tokio::test]
async fn test_json_analysis_without_disease_appends_note() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(json_request(&json!({"age": 0, "gender": "Other", "disease": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(json["disease_branch"], false);
    assert_eq!(json["task_count"], 3);
    assert!(json["result"].as_str().unwrap().ends_with("\n disease: "));
}

#[tokio::test]
async fn test_json_analysis_upstream_failure() {
    let app = setup_app(ScriptedModel::failing_on(3));

    let response = app
        .oneshot(json_request(&json!({"age": 45, "gender": "Male", "disease": "no"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_json_analysis_requires_age() {
    let app = setup_app(ScriptedModel::new());

    let response = app
        .oneshot(json_request(&json!({"gender": "Male", "disease": "no"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_form_result_never_links_to_scripts() {
    let app = setup_app(ScriptedModel::with_script(&[
        "Final Answer: See [this plan](javascript:alert(document.cookie)).",
    ]));

    let response = app
        .oneshot(form_request(
            "age=45&gender=Male&disease=%5Bx%5D(javascript%3Aalert(1))",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.to_lowercase().contains(r#"href="javascript"#));
    assert!(html.contains(r##"<a href="#">this plan</a>"##));
}
