//! # SimpliTab Common Library
//!
//! Shared code for the SimpliTab service:
//! - Error and Result types
//! - TOML configuration loading
//! - UI event types and the broadcast event bus
//! - Server-Sent Events helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
