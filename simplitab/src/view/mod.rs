//! Input Collector and view state
//!
//! [`ViewController`] is the single owner of the [`ViewState`] record; HTTP
//! handlers and the renderer only read snapshots of it.

pub mod clipboard;
pub mod controller;
pub mod state;

pub use clipboard::{CapturedClipboard, Clipboard};
pub use controller::{FormUpdate, SubmitOutcome, ViewController, COPY_ACK_DURATION};
pub use state::{ViewSnapshot, ViewState, REQUEST_FAILURE_MESSAGE};
