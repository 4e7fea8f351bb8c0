//! HTTP API handlers for simplitab

pub mod buildinfo;
pub mod health;
pub mod sse;
pub mod ui;
pub mod view;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use sse::event_stream;
pub use ui::ui_routes;
pub use view::view_routes;
