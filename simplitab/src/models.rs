//! Domain types: simplification levels, presets, generation requests and
//! the tablature returned by the model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty preset controlling the style of the generated tablature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimplificationLevel {
    /// Single-note main melody
    #[default]
    Melody,
    /// Two-note power chords or root notes only
    PowerChord,
    /// Playable with one or two fingers
    OneFinger,
}

impl SimplificationLevel {
    pub const ALL: [SimplificationLevel; 3] = [
        SimplificationLevel::Melody,
        SimplificationLevel::PowerChord,
        SimplificationLevel::OneFinger,
    ];

    /// Level context embedded in the model instruction
    pub fn description(&self) -> &'static str {
        match self {
            SimplificationLevel::Melody => {
                "Apenas a melodia principal nota por nota, usando o mínimo de cordas possível."
            }
            SimplificationLevel::PowerChord => {
                "Versão simplificada usando power chords de 2 notas ou apenas as tônicas."
            }
            SimplificationLevel::OneFinger => {
                "Arranjo adaptado para ser tocado preferencialmente com um ou dois dedos no máximo."
            }
        }
    }

    /// Button label shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            SimplificationLevel::Melody => "Melodia (1 nota)",
            SimplificationLevel::PowerChord => "Tônicas/PowerChords",
            SimplificationLevel::OneFinger => "Dedo Único",
        }
    }

    /// Identifier used in form payloads and HTML attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplificationLevel::Melody => "Melody",
            SimplificationLevel::PowerChord => "PowerChord",
            SimplificationLevel::OneFinger => "OneFinger",
        }
    }
}

/// A suggested song/artist pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub song: &'static str,
    pub artist: &'static str,
}

/// Fixed suggestions offered under the form
pub const PRESETS: [Preset; 4] = [
    Preset {
        song: "Seven Nation Army",
        artist: "White Stripes",
    },
    Preset {
        song: "Smoke on the Water",
        artist: "Deep Purple",
    },
    Preset {
        song: "Sweet Child O Mine",
        artist: "Guns N Roses",
    },
    Preset {
        song: "Another One Bites the Dust",
        artist: "Queen",
    },
];

/// One submission's inputs; lives only for the duration of the call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Identifies the submission in logs and events
    pub id: Uuid,
    pub song: String,
    pub artist: Option<String>,
    pub level: SimplificationLevel,
}

impl GenerationRequest {
    /// Build a request; a blank artist is treated as absent
    pub fn new(song: impl Into<String>, artist: Option<&str>, level: SimplificationLevel) -> Self {
        let artist = artist
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Self {
            id: Uuid::new_v4(),
            song: song.into(),
            artist,
            level,
        }
    }
}

/// One tablature line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLine {
    /// String label, e.g. "E" or "A"
    #[serde(rename = "string")]
    pub string_label: String,
    /// Fret notation, e.g. "---0-2-3---"
    pub notes: String,
}

/// Simplified riff produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiffResult {
    pub song_title: String,
    pub artist: String,
    pub tuning: String,
    pub difficulty_label: String,
    pub tab: Vec<TabLine>,
    pub explanation: String,
}

impl RiffResult {
    /// Clipboard form of the tab: `label|notes` lines joined with `\n`
    pub fn clipboard_text(&self) -> String {
        self.tab
            .iter()
            .map(|line| format!("{}|{}", line.string_label, line.notes))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when every `notes` string has the same character count
    pub fn is_aligned(&self) -> bool {
        let mut widths = self.tab.iter().map(|line| line.notes.chars().count());
        match widths.next() {
            Some(first) => widths.all(|w| w == first),
            None => true,
        }
    }
}
