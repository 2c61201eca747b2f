// Active-item controller: owns which entry is active, whether it is playing,
// and when the public events fire. Every mutation goes store first, then
// reconciliation, then events.

use tracing::{debug, info, trace};

use crate::models::{TitledRef, Track};
use crate::player::events::{Handlers, QueueEvent};
use crate::player::queue::{EntryId, EntryState, QueueEntry, QueueStore};

#[derive(Debug, Default)]
struct ActiveState {
    /// Identity of the active entry. Resolved to an index on every lookup.
    current: Option<EntryId>,
    /// Entry that last received the active flag. Cleared on the next hand-off,
    /// even if `current` was already dropped by a removal.
    last_active: Option<EntryId>,
}

/// The playlist queue: an ordered store plus the active-entry state machine.
#[derive(Debug)]
pub struct PlaylistQueue {
    store: QueueStore,
    active: ActiveState,
    handlers: Handlers,
}

impl Default for PlaylistQueue {
    fn default() -> Self {
        Self::new(Handlers::default())
    }
}

impl PlaylistQueue {
    pub fn new(handlers: Handlers) -> Self {
        Self {
            store: QueueStore::new(),
            active: ActiveState::default(),
            handlers,
        }
    }

    // ── Read-only lookups ──

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        self.store.entries()
    }

    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.store.get(index)
    }

    pub fn find(&self, id: EntryId) -> Option<&QueueEntry> {
        self.store.find(id)
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.store.position_of(id)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.current.and_then(|id| self.store.position_of(id))
    }

    pub fn is_playing(&self) -> bool {
        self.current().is_some_and(QueueEntry::is_playing)
    }

    pub fn current(&self) -> Option<&QueueEntry> {
        self.neighbor(0)
    }

    pub fn next(&self) -> Option<&QueueEntry> {
        self.neighbor(1)
    }

    pub fn previous(&self) -> Option<&QueueEntry> {
        self.neighbor(-1)
    }

    /// Entry `direction` slots away from the active one. No wraparound.
    fn neighbor(&self, direction: isize) -> Option<&QueueEntry> {
        let index = self.active_index()?.checked_add_signed(direction)?;
        self.store.get(index)
    }

    // ── Gesture reports ──

    /// A new item was dropped into the queue at `position`.
    pub fn drop_in(&mut self, track: Track, position: usize) -> EntryId {
        let position = position.min(self.store.len());
        let id = self.store.insert(track, position);
        debug!(%id, position, size = self.store.len(), "entry dropped in");
        self.reconcile(position);
        id
    }

    /// A drag started on the entry at `index`.
    pub fn sort_start(&mut self, index: usize) -> Option<EntryId> {
        let entry = self.store.get(index)?;
        self.handlers.emit(QueueEvent::SortStart(entry));
        Some(entry.id())
    }

    /// The drag on the entry at `index` is about to be released.
    pub fn sort_before_stop(&mut self, index: usize) -> Option<EntryId> {
        let entry = self.store.get(index)?;
        self.handlers.emit(QueueEvent::SortBeforeStop(entry));
        Some(entry.id())
    }

    /// The list order changed around the entry at `index` (a drop landed).
    pub fn sort_change(&mut self, index: usize) -> Option<EntryId> {
        let entry = self.store.get(index)?;
        self.handlers.emit(QueueEvent::SortChange(entry));
        Some(entry.id())
    }

    /// Move the entry at `from` to `to`. Returns false when nothing moved.
    /// The active flag stays with the moved entry's identity.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let Some(last) = self.store.len().checked_sub(1) else {
            return false;
        };
        let to = to.min(last);
        if from > last || from == to {
            trace!(from, to, "reorder ignored");
            return false;
        }
        self.store.move_entry(from, to);
        debug!(from, to, "entry reordered");
        self.reconcile(to);
        if let Some(entry) = self.store.get(to) {
            self.handlers.emit(QueueEvent::SortChange(entry));
        }
        true
    }

    /// Remove the entry at `index`, either by its remove button or by dragging
    /// it out of the list. The returned entry keeps the state it had when removed.
    pub fn remove(&mut self, index: usize) -> Option<QueueEntry> {
        let removed = self.store.remove(index)?;
        debug!(id = %removed.id(), index, size = self.store.len(), "entry removed");
        self.handlers.emit(QueueEvent::Remove {
            entry: &removed,
            index,
        });

        if self.active.current == Some(removed.id()) {
            self.active.current = None;
        }

        if self.store.is_empty() {
            self.active = ActiveState::default();
            self.handlers.emit(QueueEvent::Empty);
        } else {
            self.reconcile(index);
        }
        Some(removed)
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Option<QueueEntry> {
        let index = self.store.position_of(id)?;
        self.remove(index)
    }

    // ── Playback controls ──

    /// Resume the active entry. `on_play` fires even if it was already playing.
    /// Returns the entry, or None when nothing is active.
    pub fn play(&mut self) -> Option<&QueueEntry> {
        let index = self.active_index()?;
        self.start_playing();
        self.store.get(index)
    }

    /// Pause the active entry. `on_pause` fires even if it was already paused.
    pub fn pause(&mut self) -> Option<&QueueEntry> {
        let id = self.active.current?;
        let entry = self.store.find_mut(id)?;
        if entry.is_playing() {
            entry.set_state(EntryState::ActivePaused);
        }
        let entry = &*entry;
        self.handlers.emit(QueueEvent::Pause(entry));
        Some(entry)
    }

    /// Activate the entry at `index` and start playing it. Returns None when
    /// there is no such entry or it is already the active, playing one.
    pub fn set_active(&mut self, index: usize) -> Option<&QueueEntry> {
        if !self.activate(index) {
            return None;
        }
        self.start_playing();
        self.store.get(index)
    }

    pub fn set_next(&mut self) -> Option<&QueueEntry> {
        self.step(1)
    }

    pub fn set_previous(&mut self) -> Option<&QueueEntry> {
        self.step(-1)
    }

    /// Play button on an entry.
    pub fn play_entry(&mut self, id: EntryId) -> Option<&QueueEntry> {
        let index = self.store.position_of(id)?;
        self.set_active(index)
    }

    /// Pause button on an entry. Only the active entry can be paused.
    pub fn pause_entry(&mut self, id: EntryId) -> Option<&QueueEntry> {
        if self.active.current != Some(id) {
            return None;
        }
        self.pause()
    }

    /// Artist link on an entry. Navigation is up to the host; the queue only
    /// resolves which artist the entry points at.
    pub fn goto_artist(&self, id: EntryId) -> Option<&TitledRef> {
        let artist = &self.store.find(id)?.track().artist;
        info!(%id, artist = %artist.title, "artist link followed");
        Some(artist)
    }

    fn step(&mut self, direction: isize) -> Option<&QueueEntry> {
        let index = self.active_index()?.checked_add_signed(direction)?;
        if index >= self.store.len() {
            return None;
        }
        self.set_active(index);
        self.store.get(index)
    }

    // ── Reconciliation ──

    /// Re-seed the active pointer after a structural change. Picks the entry
    /// at `position`, or the new last entry when `position` ran off the end.
    fn reconcile(&mut self, position: usize) {
        if self.active.current.is_some() {
            return;
        }
        let Some(last) = self.store.len().checked_sub(1) else {
            return;
        };
        let index = position.min(last);
        debug!(index, "reselecting active entry");
        if self.activate(index) {
            self.start_playing();
        }
    }

    /// Hand the active flag to the entry at `index` without starting playback.
    fn activate(&mut self, index: usize) -> bool {
        let Some(target) = self.store.get(index) else {
            return false;
        };
        let target_id = target.id();
        if self.active.current == Some(target_id) && target.is_playing() {
            trace!(index, "entry already active and playing");
            return false;
        }

        for previous in [self.active.last_active, self.active.current]
            .into_iter()
            .flatten()
        {
            if let Some(entry) = self.store.find_mut(previous) {
                entry.set_state(EntryState::Inactive);
            }
        }

        let Some(entry) = self.store.get_mut(index) else {
            return false;
        };
        entry.set_state(EntryState::ActivePaused);
        self.active.current = Some(target_id);
        self.active.last_active = Some(target_id);
        debug!(id = %target_id, index, "active entry changed");

        let entry = &*entry;
        self.handlers.emit(QueueEvent::ActiveChange(entry));
        true
    }

    fn start_playing(&mut self) {
        let Some(id) = self.active.current else {
            return;
        };
        let Some(entry) = self.store.find_mut(id) else {
            return;
        };
        entry.set_state(EntryState::ActivePlaying);
        let entry = &*entry;
        self.handlers.emit(QueueEvent::Play(entry));
    }
}
