//! View-state JSON API
//!
//! The page script drives the Input Collector through these endpoints and
//! re-renders from the snapshots they return.

use crate::models::PRESETS;
use crate::view::{CapturedClipboard, FormUpdate, ViewSnapshot};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

/// One entry of `GET /api/presets`
#[derive(Debug, Serialize)]
pub struct PresetInfo {
    pub index: usize,
    pub song: &'static str,
    pub artist: &'static str,
}

/// Response of `POST /api/submit`
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// False when the song was blank and nothing was sent
    pub accepted: bool,
}

/// Response of `POST /api/copy`
#[derive(Debug, Serialize)]
pub struct CopyResponse {
    /// Text for the browser to place on the system clipboard
    pub text: String,
    pub copied: bool,
}

/// GET /api/view
pub async fn get_view(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.controller.snapshot().await.into())
}

/// POST /api/form
///
/// **Request:** `{"song": "...", "artist": "...", "level": "PowerChord"}`, all optional
pub async fn update_form(
    State(state): State<AppState>,
    Json(update): Json<FormUpdate>,
) -> Json<ViewSnapshot> {
    Json(state.controller.update_form(update).await.into())
}

/// GET /api/presets
pub async fn list_presets() -> Json<Vec<PresetInfo>> {
    Json(
        PRESETS
            .iter()
            .enumerate()
            .map(|(index, preset)| PresetInfo {
                index,
                song: preset.song,
                artist: preset.artist,
            })
            .collect(),
    )
}

/// POST /api/presets/:index
pub async fn select_preset(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<ViewSnapshot>> {
    let snapshot = state.controller.select_preset(index).await?;
    Ok(Json(snapshot.into()))
}

/// POST /api/submit
///
/// Starts the submission in the background so the form stays interactive;
/// progress arrives over `/events`.
pub async fn submit(State(state): State<AppState>) -> (StatusCode, Json<SubmitResponse>) {
    if !state.controller.snapshot().await.can_submit() {
        debug!("Submit request with blank song ignored");
        return (StatusCode::OK, Json(SubmitResponse { accepted: false }));
    }

    let controller = state.controller.clone();
    tokio::spawn(async move {
        controller.submit().await;
    });

    (StatusCode::ACCEPTED, Json(SubmitResponse { accepted: true }))
}

/// POST /api/copy
///
/// **Errors:** 409 Conflict when there is no tablature to copy
pub async fn copy_tab(State(state): State<AppState>) -> ApiResult<Json<CopyResponse>> {
    let clipboard = CapturedClipboard::new();
    state
        .controller
        .copy_tab(&clipboard)
        .await
        .ok_or_else(|| ApiError::Conflict("No tablature to copy".to_string()))?;

    let text = clipboard.take().unwrap_or_default();
    Ok(Json(CopyResponse { text, copied: true }))
}

/// Build view-state routes
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/form", post(update_form))
        .route("/api/presets", get(list_presets))
        .route("/api/presets/:index", post(select_preset))
        .route("/api/submit", post(submit))
        .route("/api/copy", post(copy_tab))
}
