//! Top-level controller owning the view state
//!
//! State machine: Idle → (submit, song non-empty) → Loading → Result | Error.
//! A submission while Loading is allowed; each submission is tagged with a
//! sequence number and only the latest one may write its outcome.

use super::clipboard::Clipboard;
use super::state::{ViewState, REQUEST_FAILURE_MESSAGE};
use crate::models::{GenerationRequest, SimplificationLevel, PRESETS};
use crate::services::RiffGenerator;
use serde::Deserialize;
use simplitab_common::events::{EventBus, UiEvent, ViewPhase};
use simplitab_common::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// How long the copy acknowledgement stays visible
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// What happened to a submit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Song was blank; nothing was sent and state is unchanged
    Rejected,
    /// The call resolved and its outcome was applied
    Completed(ViewPhase),
    /// A newer submission was issued meanwhile; this outcome was dropped
    Superseded,
}

/// Partial form update; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormUpdate {
    pub song: Option<String>,
    pub artist: Option<String>,
    pub level: Option<SimplificationLevel>,
}

/// Owns the [`ViewState`] and mediates every change to it
pub struct ViewController {
    state: RwLock<ViewState>,
    generator: Arc<dyn RiffGenerator>,
    event_bus: EventBus,
    /// Sequence number of the most recently issued submission
    latest_submission: AtomicU64,
    /// Bumped on every copy; a revert timer only fires for its own generation
    copy_generation: AtomicU64,
    copy_ack_duration: Duration,
    /// Underlying cause of the last failed submission (diagnostics only)
    last_failure: RwLock<Option<String>>,
}

impl ViewController {
    pub fn new(generator: Arc<dyn RiffGenerator>, event_bus: EventBus) -> Self {
        Self {
            state: RwLock::new(ViewState::default()),
            generator,
            event_bus,
            latest_submission: AtomicU64::new(0),
            copy_generation: AtomicU64::new(0),
            copy_ack_duration: COPY_ACK_DURATION,
            last_failure: RwLock::new(None),
        }
    }

    pub fn with_copy_ack_duration(mut self, duration: Duration) -> Self {
        self.copy_ack_duration = duration;
        self
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn last_failure(&self) -> Option<String> {
        self.last_failure.read().await.clone()
    }

    fn notify(&self, phase: ViewPhase) {
        self.event_bus.emit_lossy(UiEvent::view_changed(phase));
    }

    /// Apply a partial form update
    pub async fn update_form(&self, update: FormUpdate) -> ViewState {
        let snapshot = {
            let mut state = self.state.write().await;
            if let Some(song) = update.song {
                state.song = song;
            }
            if let Some(artist) = update.artist {
                state.artist = artist;
            }
            if let Some(level) = update.level {
                state.level = level;
            }
            state.clone()
        };
        self.notify(snapshot.phase());
        snapshot
    }

    /// Overwrite song and artist with preset `index`
    pub async fn select_preset(&self, index: usize) -> Result<ViewState> {
        let preset = PRESETS
            .get(index)
            .ok_or_else(|| Error::NotFound(format!("preset {}", index)))?;

        let snapshot = {
            let mut state = self.state.write().await;
            state.song = preset.song.to_string();
            state.artist = preset.artist.to_string();
            state.clone()
        };
        debug!(song = preset.song, artist = preset.artist, "Preset selected");
        self.notify(snapshot.phase());
        Ok(snapshot)
    }

    /// Send the current form to the generator and apply the outcome
    ///
    /// Suspends until the generator resolves. Callers that must stay
    /// responsive (HTTP handlers) spawn this.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, sequence) = {
            let mut state = self.state.write().await;
            if !state.can_submit() {
                debug!("Submit ignored: song is blank");
                return SubmitOutcome::Rejected;
            }

            let sequence = self.latest_submission.fetch_add(1, Ordering::SeqCst) + 1;
            let request =
                GenerationRequest::new(state.song.clone(), Some(state.artist.as_str()), state.level);

            state.loading = true;
            state.error = None;
            state.result = None;
            state.copied = false;
            (request, sequence)
        };

        info!(
            submission = %request.id,
            sequence,
            song = %request.song,
            artist = ?request.artist,
            level = request.level.as_str(),
            "Submission started"
        );
        self.event_bus.emit_lossy(UiEvent::SubmissionStarted {
            submission_id: request.id,
            sequence,
            timestamp: chrono::Utc::now(),
        });
        self.notify(ViewPhase::Loading);

        let outcome = self.generator.generate(&request).await;

        let phase = {
            let mut state = self.state.write().await;
            if self.latest_submission.load(Ordering::SeqCst) != sequence {
                drop(state);
                info!(
                    submission = %request.id,
                    sequence,
                    "Discarding outcome of superseded submission"
                );
                self.event_bus.emit_lossy(UiEvent::SubmissionDiscarded {
                    submission_id: request.id,
                    sequence,
                    timestamp: chrono::Utc::now(),
                });
                return SubmitOutcome::Superseded;
            }

            state.loading = false;
            match outcome {
                Ok(riff) => {
                    state.result = Some(riff);
                    state.error = None;
                }
                Err(e) => {
                    warn!(submission = %request.id, error = %e, "Submission failed");
                    *self.last_failure.write().await = Some(e.to_string());
                    state.result = None;
                    state.error = Some(REQUEST_FAILURE_MESSAGE.to_string());
                }
            }
            state.phase()
        };

        info!(submission = %request.id, sequence, phase = phase.as_str(), "Submission finished");
        self.event_bus.emit_lossy(UiEvent::SubmissionFinished {
            submission_id: request.id,
            sequence,
            phase,
            timestamp: chrono::Utc::now(),
        });
        self.notify(phase);

        SubmitOutcome::Completed(phase)
    }

    /// Copy the current tab to `clipboard` and raise the acknowledgement
    ///
    /// Returns the copied text, or `None` (and does nothing) without a result.
    /// The acknowledgement reverts [`COPY_ACK_DURATION`] after the last copy.
    pub async fn copy_tab(self: &Arc<Self>, clipboard: &dyn Clipboard) -> Option<String> {
        let (text, generation) = {
            let mut state = self.state.write().await;
            let text = state.result.as_ref()?.clipboard_text();
            clipboard.write_text(&text);
            state.copied = true;
            (text, self.copy_generation.fetch_add(1, Ordering::SeqCst) + 1)
        };
        self.notify(ViewPhase::Result);

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(controller.copy_ack_duration).await;
            if controller.copy_generation.load(Ordering::SeqCst) != generation {
                return;
            }
            let phase = {
                let mut state = controller.state.write().await;
                state.copied = false;
                state.phase()
            };
            controller.notify(phase);
        });

        Some(text)
    }
}
