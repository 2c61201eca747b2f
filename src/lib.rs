// Library root: re-exports all modules so integration tests can `use playlist_queue::*`.

pub mod action;
pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod player;

pub use models::{TitledRef, Track};
pub use player::{
    DragSource, DragStatus, EntryId, EntryState, GestureOutcome, Handlers, PlaylistQueue,
    QueueEntry, QueueEvent, SortSession,
};
