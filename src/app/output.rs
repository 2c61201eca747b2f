// Output formatting for query results and drag feedback, text or JSON per config.

use serde::Serialize;
use serde_json::json;

use crate::app::App;
use crate::config::EventFormat;
use crate::player::gesture::DragStatus;
use crate::player::queue::{EntryState, QueueEntry};

impl App {
    pub(super) fn report_value<T>(&self, key: &str, value: T)
    where
        T: Serialize + std::fmt::Display,
    {
        let line = match self.config.events.format {
            EventFormat::Text => format!("{key}: {value}"),
            EventFormat::Json => json!({ "query": key, "value": value }).to_string(),
        };
        self.emit_line(line);
    }

    pub(super) fn report_entry(&self, key: &str, index: Option<usize>, entry: Option<&QueueEntry>) {
        let line = match (self.config.events.format, entry) {
            (EventFormat::Text, Some(e)) => format!("{key}: {}", describe(index, e)),
            (EventFormat::Text, None) => format!("{key}: none"),
            (EventFormat::Json, Some(e)) => {
                json!({ "query": key, "index": index, "entry": e }).to_string()
            }
            (EventFormat::Json, None) => json!({ "query": key, "entry": null }).to_string(),
        };
        self.emit_line(line);
    }

    pub(super) fn report_snapshot(&self) {
        match self.config.events.format {
            EventFormat::Text => {
                self.emit_line(format!("snapshot: {} entries", self.queue.len()));
                for (i, entry) in self.queue.entries().iter().enumerate() {
                    self.emit_line(format!("  {}", describe(Some(i), entry)));
                }
            }
            EventFormat::Json => {
                let line = json!({ "query": "snapshot", "entries": self.queue.entries() });
                self.emit_line(line.to_string());
            }
        }
    }

    pub(super) fn report_drag_status(&self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let status = match session.status() {
            DragStatus::Valid => "valid",
            DragStatus::Invalid => "invalid",
        };
        self.report_value("drag", status);
    }
}

fn describe(index: Option<usize>, entry: &QueueEntry) -> String {
    let marker = match entry.state() {
        EntryState::Inactive => "",
        EntryState::ActivePlaying => " (playing)",
        EntryState::ActivePaused => " (paused)",
    };
    let index = index.map_or_else(|| "-".to_string(), |i| i.to_string());
    format!(
        "[{index}] {} {}{marker}",
        entry.id(),
        entry.track().display_title()
    )
}
