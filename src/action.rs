// Every gesture report, public call, and host signal is represented as an
// Action variant. Input lines are JSON objects tagged by `"action"`, e.g.
// {"action": "drop_in", "position": 0, "track": {...}}.

use anyhow::Context;
use serde::Deserialize;

use crate::models::Track;

/// All inputs flowing into the host loop. The [`App`](crate::app::App)
/// dispatches each variant to the queue.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Quit,

    // Drag gestures, reported step by step.
    DragEntry { index: usize },
    DragTrack { track: Track },
    DragOver,
    DragOut,
    DragRelease { position: usize },

    // Gesture outcomes, reported in one go.
    DropIn { track: Track, position: usize },
    Reorder { from: usize, to: usize },
    Remove { index: usize },

    // Playback controls
    Play,
    Pause,
    SetActive { index: usize },
    SetNext,
    SetPrevious,

    // Per-entry links
    GotoArtist { index: usize },

    // Queries
    GetCurrent,
    GetNext,
    GetPrevious,
    GetSize,
    IsPlaying,
    Snapshot,

    #[serde(skip)]
    ShowError(String),
}

impl Action {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let action = serde_json::from_str(line)
            .with_context(|| format!("invalid action line: {line}"))?;
        Ok(Some(action))
    }
}
