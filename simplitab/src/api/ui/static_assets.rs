//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const SIMPLITAB_JS: &str = include_str!("../../../static/simplitab.js");
const SIMPLITAB_CSS: &str = include_str!("../../../static/simplitab.css");

/// GET /static/simplitab.js
pub async fn serve_simplitab_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        SIMPLITAB_JS,
    )
        .into_response()
}

/// GET /static/simplitab.css
pub async fn serve_simplitab_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        SIMPLITAB_CSS,
    )
        .into_response()
}
