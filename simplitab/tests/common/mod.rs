//! Shared test helpers: scripted generator and sample data

#![allow(dead_code)]

use async_trait::async_trait;
use simplitab::models::{GenerationRequest, RiffResult, TabLine};
use simplitab::services::{GenerationError, RiffGenerator};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply: wait `delay`, then answer
pub struct Reply {
    pub delay: Duration,
    pub outcome: Result<RiffResult, String>,
}

impl Reply {
    pub fn ok(riff: RiffResult) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(riff),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(message.to_string()),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Generator that replays scripted replies and records every request
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RiffGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<RiffResult, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::fail("no scripted reply"));

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome.map_err(GenerationError::Network)
    }
}

pub fn sample_riff(title: &str, artist: &str) -> RiffResult {
    RiffResult {
        song_title: title.to_string(),
        artist: artist.to_string(),
        tuning: "Standard".to_string(),
        difficulty_label: "Nível Zero".to_string(),
        tab: vec![
            TabLine {
                string_label: "E".to_string(),
                notes: "--0--".to_string(),
            },
            TabLine {
                string_label: "A".to_string(),
                notes: "--2--".to_string(),
            },
        ],
        explanation: "Use apenas o dedo indicador.".to_string(),
    }
}

/// Conformant `generateContent` envelope wrapping `payload` as answer text
pub fn gemini_envelope(payload: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": payload.to_string() }]
            },
            "finishReason": "STOP"
        }]
    })
}
