//! UI Routes - HTML pages for the simplitab web interface
//!
//! - **Root Page** (`root`): form plus results area
//! - **Results** (`results`): Result Renderer, also served as a fragment
//! - **Static Assets** (`static_assets`): CSS/JS file serving

use crate::AppState;
use axum::{routing::get, Router};

mod results;
mod root;
mod static_assets;

pub use results::{escape_html, render_results};
pub use root::render_page;

use results::results_fragment;
use root::root_page;
use static_assets::{serve_simplitab_css, serve_simplitab_js};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/view/results", get(results_fragment))
        .route("/static/simplitab.js", get(serve_simplitab_js))
        .route("/static/simplitab.css", get(serve_simplitab_css))
}
