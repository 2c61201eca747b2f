// One drag gesture against the queue, from pick-up to release.
// Tracks whether the pointer is over the list so a release outside it turns
// into a removal (for queue entries) or is thrown away (for new drops).

use tracing::debug;

use crate::models::Track;
use crate::player::controller::PlaylistQueue;
use crate::player::queue::{EntryId, QueueEntry};

/// What is being dragged.
#[derive(Debug, Clone)]
pub enum DragSource {
    /// An entry already in the queue.
    Existing(EntryId),
    /// A new item picked up from the source collection.
    Incoming(Track),
}

/// Whether releasing now would land inside the queue. Drives the helper tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStatus {
    Valid,
    Invalid,
}

#[derive(Debug)]
pub enum GestureOutcome {
    Reordered { from: usize, to: usize },
    /// Released inside the list at its own position.
    Unchanged,
    Dropped(EntryId),
    /// Released outside the list; the entry was taken out of the queue.
    Removed(QueueEntry),
    /// A new item released outside the list.
    Discarded(Track),
}

#[derive(Debug)]
pub struct SortSession {
    source: DragSource,
    status: DragStatus,
}

impl SortSession {
    /// Pick up the queue entry at `index`. Fires `on_sort_start`.
    /// The pointer starts over the list, so the drop is valid until `out()`.
    pub fn begin_reorder(queue: &mut PlaylistQueue, index: usize) -> Option<Self> {
        let id = queue.sort_start(index)?;
        Some(Self {
            source: DragSource::Existing(id),
            status: DragStatus::Valid,
        })
    }

    /// Pick up a new item from the source collection. Invalid until `over()`.
    pub fn begin_drop(track: Track) -> Self {
        Self {
            source: DragSource::Incoming(track),
            status: DragStatus::Invalid,
        }
    }

    pub fn source(&self) -> &DragSource {
        &self.source
    }

    pub fn status(&self) -> DragStatus {
        self.status
    }

    /// Pointer entered the list.
    pub fn over(&mut self) {
        self.status = DragStatus::Valid;
    }

    /// Pointer left the list.
    pub fn out(&mut self) {
        self.status = DragStatus::Invalid;
    }

    /// Release the drag at `target` and apply the result to the queue.
    pub fn finish(self, queue: &mut PlaylistQueue, target: usize) -> GestureOutcome {
        let valid = self.status == DragStatus::Valid;
        match self.source {
            DragSource::Existing(id) => {
                let Some(from) = queue.position_of(id) else {
                    return GestureOutcome::Unchanged;
                };
                queue.sort_before_stop(from);
                if !valid {
                    debug!(%id, from, "entry dragged out of the queue");
                    return match queue.remove(from) {
                        Some(entry) => GestureOutcome::Removed(entry),
                        None => GestureOutcome::Unchanged,
                    };
                }
                if queue.reorder(from, target) {
                    let to = queue.position_of(id).unwrap_or(target);
                    GestureOutcome::Reordered { from, to }
                } else {
                    GestureOutcome::Unchanged
                }
            }
            DragSource::Incoming(track) => {
                if valid {
                    let id = queue.drop_in(track, target);
                    if let Some(index) = queue.position_of(id) {
                        queue.sort_change(index);
                    }
                    GestureOutcome::Dropped(id)
                } else {
                    debug!(song = %track.song.title, "drop outside the queue discarded");
                    GestureOutcome::Discarded(track)
                }
            }
        }
    }
}
