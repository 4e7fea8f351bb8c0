//! The view-state record

use crate::models::{RiffResult, SimplificationLevel};
use crate::services::prompt::sanitize_field;
use serde::Serialize;
use simplitab_common::events::ViewPhase;

/// User-facing text for every generation failure
pub const REQUEST_FAILURE_MESSAGE: &str = "Não conseguimos simplificar este riff no momento. Tente uma música mais popular ou verifique o nome.";

/// Form fields plus the slots written by submission completions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub song: String,
    pub artist: String,
    pub level: SimplificationLevel,
    pub loading: bool,
    pub result: Option<RiffResult>,
    pub error: Option<String>,
    /// Copy acknowledgement indicator
    pub copied: bool,
}

impl ViewState {
    /// Loading wins over a stale error/result; result and error never coexist
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.error.is_some() {
            ViewPhase::Error
        } else if self.result.is_some() {
            ViewPhase::Result
        } else {
            ViewPhase::Idle
        }
    }

    /// True when the song field would be accepted by submit
    ///
    /// Judged on the text that would reach the instruction, so a song made
    /// only of control characters counts as blank.
    pub fn can_submit(&self) -> bool {
        !sanitize_field(&self.song).is_empty()
    }
}

/// Serialized view state with the derived phase, for `/api/view`
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub phase: ViewPhase,
    #[serde(flatten)]
    pub state: ViewState,
}

impl From<ViewState> for ViewSnapshot {
    fn from(state: ViewState) -> Self {
        Self {
            phase: state.phase(),
            state,
        }
    }
}
