// src/player/mod.rs

pub mod controller;
pub mod events;
pub mod gesture;
pub mod queue;

pub use controller::PlaylistQueue;
pub use events::{Handlers, QueueEvent};
pub use gesture::{DragSource, DragStatus, GestureOutcome, SortSession};
pub use queue::{EntryId, EntryState, QueueEntry, QueueStore};
