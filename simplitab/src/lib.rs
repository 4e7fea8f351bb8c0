//! simplitab library interface
//!
//! Web front-end that turns a song title, optional artist and difficulty
//! tier into a beginner-friendly guitar tab produced by a generative model.
//!
//! Pipeline: Input Collector ([`view`]) → Request Builder ([`services`]) →
//! Result Renderer ([`api::ui`]).

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod view;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use services::RiffGenerator;
use simplitab_common::events::EventBus;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use view::ViewController;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Owner of the view state
    pub controller: Arc<ViewController>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(generator: Arc<dyn RiffGenerator>, event_bus: EventBus) -> Self {
        let controller = Arc::new(ViewController::new(generator, event_bus.clone()));
        Self::with_controller(controller, event_bus)
    }

    pub fn with_controller(controller: Arc<ViewController>, event_bus: EventBus) -> Self {
        Self {
            controller,
            event_bus,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // UI routes (HTML pages and assets)
        .merge(api::ui_routes())
        // JSON API routes
        .merge(api::view_routes())
        .route("/events", get(api::event_stream))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
