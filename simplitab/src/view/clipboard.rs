//! Clipboard sinks
//!
//! The copy action writes through a [`Clipboard`]. In the web service the
//! system clipboard belongs to the browser: the page script writes the
//! rendered tab lines itself, within the click, and the HTTP handler hands the
//! controller a [`CapturedClipboard`] and echoes the captured text back.

use std::sync::Mutex;

/// Fire-and-forget UTF-8 text sink
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str);
}

/// Keeps the last written text
#[derive(Debug, Default)]
pub struct CapturedClipboard {
    text: Mutex<Option<String>>,
}

impl CapturedClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text, if any
    pub fn take(&self) -> Option<String> {
        self.text.lock().ok().and_then(|mut text| text.take())
    }
}

impl Clipboard for CapturedClipboard {
    fn write_text(&self, text: &str) {
        if let Ok(mut slot) = self.text.lock() {
            *slot = Some(text.to_string());
        }
    }
}
