//! Request Builder: prompt construction, the generative-service client and
//! validation of its output.

pub mod gemini_client;
pub mod prompt;
pub mod response_validator;

pub use gemini_client::{GeminiClient, GeminiConfig};
pub use response_validator::{parse_riff_payload, SchemaViolation};

use crate::models::{GenerationRequest, RiffResult};
use async_trait::async_trait;
use thiserror::Error;

/// Everything that can go wrong producing a riff
///
/// These never reach the user individually; the view controller collapses
/// them into one request-failure message and logs the cause.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Prompt blocked by provider: {0}")]
    Blocked(String),

    #[error("Malformed service response: {0}")]
    Decode(String),

    #[error("Service returned no content")]
    EmptyResponse,

    #[error("Response does not match schema: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Produces a simplified riff for one request
///
/// One call makes exactly one attempt; implementations do not retry or cache.
#[async_trait]
pub trait RiffGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<RiffResult, GenerationError>;
}
