// src/player/queue.rs

use serde::Serialize;

use crate::models::Track;

/// Stable identity of a queue entry. Assigned once on insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Per-entry activity. Only the controller changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    #[default]
    Inactive,
    ActivePlaying,
    ActivePaused,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    id: EntryId,
    track: Track,
    state: EntryState,
}

impl QueueEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != EntryState::Inactive
    }

    pub fn is_playing(&self) -> bool {
        self.state == EntryState::ActivePlaying
    }

    pub(crate) fn set_state(&mut self, state: EntryState) {
        self.state = state;
    }
}

/// Ordered membership of the queue. Knows nothing about activity or playback
/// and emits no events.
#[derive(Debug, Default)]
pub struct QueueStore {
    entries: Vec<QueueEntry>,
    next_id: u64,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut QueueEntry> {
        self.entries.get_mut(index)
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn find(&self, id: EntryId) -> Option<&QueueEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: EntryId) -> Option<&mut QueueEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Insert a new inactive entry at `position`. Positions past the end append.
    pub fn insert(&mut self, track: Track, position: usize) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let position = position.min(self.entries.len());
        self.entries.insert(
            position,
            QueueEntry {
                id,
                track,
                state: EntryState::Inactive,
            },
        );
        id
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<QueueEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Move the entry at `from` so that it ends up at `to` (clamped to the last slot).
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() {
            return false;
        }
        let to = to.min(self.entries.len() - 1);
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        true
    }
}
