//! HTTP Server & Routing Integration Tests
//!
//! Drives the router with `tower::ServiceExt::oneshot`; the generative
//! service is replaced by a scripted generator.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{sample_riff, Reply, ScriptedGenerator};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use simplitab::view::ViewController;
use simplitab::{build_router, AppState};
use simplitab_common::events::{EventBus, UiEvent, ViewPhase};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app_state(replies: Vec<Reply>) -> AppState {
    AppState::new(Arc::new(ScriptedGenerator::new(replies)), EventBus::new(100))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Wait for the next submission to finish and return its phase
async fn wait_for_finish(rx: &mut tokio::sync::broadcast::Receiver<UiEvent>) -> ViewPhase {
    let wait = async {
        loop {
            if let Ok(UiEvent::SubmissionFinished { phase, .. }) = rx.recv().await {
                return phase;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("submission did not finish")
}

// =============================================================================
// Pages and assets
// =============================================================================

#[tokio::test]
async fn test_root_route_serves_html() {
    let app = build_router(test_app_state(vec![]));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("SIMPLI<span>TAB</span>"));
    assert!(html.contains("Escolha uma música para começar"));
    assert!(html.contains("/static/simplitab.js"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = build_router(test_app_state(vec![]));

    let response = app.clone().oneshot(get("/static/simplitab.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/javascript"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let script = String::from_utf8(body.to_vec()).unwrap();
    // Clipboard text comes from the rendered tab, and write failures are handled
    assert!(script.contains("querySelectorAll('.tab-line')"));
    assert!(script.contains("writeText(text).catch("));

    let response = app.oneshot(get("/static/simplitab.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/css");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_router(test_app_state(vec![]));
    let (status, _) = send(&app, get("/nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_results_fragment_shows_placeholder_when_idle() {
    let app = build_router(test_app_state(vec![]));
    let (status, body) = send(&app, get("/view/results")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Escolha uma música para começar"));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "simplitab");
    assert!(json["uptime_seconds"].is_u64());
    assert!(json.get("last_error").is_none());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, get("/api/buildinfo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["git_hash"].is_string());
    assert!(json["build_profile"].is_string());
}

// =============================================================================
// Input Collector
// =============================================================================

#[tokio::test]
async fn test_initial_view_snapshot() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, get("/api/view")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "Idle");
    assert_eq!(json["song"], "");
    assert_eq!(json["level"], "Melody");
    assert_eq!(json["loading"], false);
    assert_eq!(json["copied"], false);
}

#[tokio::test]
async fn test_form_update_is_partial() {
    let app = build_router(test_app_state(vec![]));

    send_json(&app, post_json("/api/form", json!({"song": "Californication", "artist": "RHCP"}))).await;
    let (status, json) = send_json(&app, post_json("/api/form", json!({"level": "OneFinger"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["song"], "Californication");
    assert_eq!(json["artist"], "RHCP");
    assert_eq!(json["level"], "OneFinger");
}

#[tokio::test]
async fn test_unknown_level_is_rejected() {
    let app = build_router(test_app_state(vec![]));
    let (status, _) = send(&app, post_json("/api/form", json!({"level": "Expert"}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_presets_listing() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, get("/api/presets")).await;

    assert_eq!(status, StatusCode::OK);
    let presets = json.as_array().unwrap();
    assert_eq!(presets.len(), 4);
    assert_eq!(presets[1]["index"], 1);
    assert_eq!(presets[1]["song"], "Smoke on the Water");
    assert_eq!(presets[1]["artist"], "Deep Purple");
}

#[tokio::test]
async fn test_select_preset_fills_form() {
    let app = build_router(test_app_state(vec![]));
    send_json(&app, post_json("/api/form", json!({"level": "PowerChord"}))).await;

    let (status, json) = send_json(&app, post("/api/presets/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["song"], "Smoke on the Water");
    assert_eq!(json["artist"], "Deep Purple");
    assert_eq!(json["level"], "PowerChord");
}

#[tokio::test]
async fn test_select_unknown_preset_is_404() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, post("/api/presets/99")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Submission and copy
// =============================================================================

#[tokio::test]
async fn test_submit_with_blank_song_is_not_accepted() {
    let state = test_app_state(vec![]);
    let app = build_router(state.clone());

    send_json(&app, post_json("/api/form", json!({"song": "   "}))).await;
    let (status, json) = send_json(&app, post("/api/submit")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], false);
    assert_eq!(state.controller.snapshot().await.loading, false);
}

#[tokio::test]
async fn test_submit_with_control_character_song_is_not_accepted() {
    let state = test_app_state(vec![Reply::ok(sample_riff("S", "A"))]);
    let app = build_router(state.clone());

    send_json(&app, post_json("/api/form", json!({"song": "\u{7}\u{1b}"}))).await;
    let (status, json) = send_json(&app, post("/api/submit")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], false);
    assert_eq!(state.controller.snapshot().await.loading, false);
}

#[tokio::test]
async fn test_submit_runs_in_background_and_renders_result() {
    let state = test_app_state(vec![Reply::ok(sample_riff("Smoke on the Water", "Deep Purple"))]);
    let mut rx = state.event_bus.subscribe();
    let app = build_router(state.clone());

    send_json(&app, post("/api/presets/1")).await;
    let (status, json) = send_json(&app, post("/api/submit")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["accepted"], true);

    assert_eq!(wait_for_finish(&mut rx).await, ViewPhase::Result);

    let (_, json) = send_json(&app, get("/api/view")).await;
    assert_eq!(json["phase"], "Result");
    assert_eq!(json["result"]["songTitle"], "Smoke on the Water");
    assert_eq!(json["result"]["tab"][0]["string"], "E");

    let (_, body) = send(&app, get("/view/results")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Smoke on the Water"));
    assert!(html.contains("Copiar Tablatura"));
}

#[tokio::test]
async fn test_failed_submission_shows_fixed_message() {
    let state = test_app_state(vec![Reply::fail("HTTP 500")]);
    let mut rx = state.event_bus.subscribe();
    let app = build_router(state.clone());

    send_json(&app, post_json("/api/form", json!({"song": "Unknown Song"}))).await;
    send_json(&app, post("/api/submit")).await;
    assert_eq!(wait_for_finish(&mut rx).await, ViewPhase::Error);

    let (_, body) = send(&app, get("/view/results")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Não conseguimos simplificar este riff no momento."));

    let (_, json) = send_json(&app, get("/health")).await;
    assert!(json["last_error"].as_str().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_copy_without_result_is_conflict() {
    let app = build_router(test_app_state(vec![]));
    let (status, json) = send_json(&app, post("/api/copy")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_copy_returns_clipboard_text() {
    let state = test_app_state(vec![Reply::ok(sample_riff("S", "A"))]);
    let mut rx = state.event_bus.subscribe();
    let app = build_router(state.clone());

    send_json(&app, post_json("/api/form", json!({"song": "S"}))).await;
    send_json(&app, post("/api/submit")).await;
    wait_for_finish(&mut rx).await;

    let (status, json) = send_json(&app, post("/api/copy")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "E|--0--\nA|--2--");
    assert_eq!(json["copied"], true);

    let (_, body) = send(&app, get("/view/results")).await;
    assert!(String::from_utf8(body).unwrap().contains("Copiado!"));
}

#[tokio::test]
async fn test_copy_acknowledgement_reverts_over_http() {
    let event_bus = EventBus::new(100);
    let generator = Arc::new(ScriptedGenerator::new(vec![Reply::ok(sample_riff("S", "A"))]));
    let controller = Arc::new(
        ViewController::new(generator, event_bus.clone())
            .with_copy_ack_duration(Duration::from_millis(50)),
    );
    let state = AppState::with_controller(controller, event_bus);
    let mut rx = state.event_bus.subscribe();
    let app = build_router(state);

    send_json(&app, post_json("/api/form", json!({"song": "S"}))).await;
    send_json(&app, post("/api/submit")).await;
    wait_for_finish(&mut rx).await;

    let (status, _) = send_json(&app, post("/api/copy")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = send_json(&app, get("/api/view")).await;
    assert_eq!(json["copied"], true);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let (_, json) = send_json(&app, get("/api/view")).await;
    assert_eq!(json["copied"], false);

    let (_, body) = send(&app, get("/view/results")).await;
    assert!(String::from_utf8(body).unwrap().contains("Copiar Tablatura"));
}
