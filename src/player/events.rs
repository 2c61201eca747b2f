// Event notification: the public event set and the per-event handler table.

use serde::Serialize;

use crate::player::queue::QueueEntry;

/// Everything the queue announces. Entries are borrowed from the queue for the
/// duration of the handler call only.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QueueEvent<'a> {
    ActiveChange(&'a QueueEntry),
    Play(&'a QueueEntry),
    Pause(&'a QueueEntry),
    SortStart(&'a QueueEntry),
    SortChange(&'a QueueEntry),
    SortBeforeStop(&'a QueueEntry),
    Remove { entry: &'a QueueEntry, index: usize },
    Empty,
}

impl<'a> QueueEvent<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActiveChange(_) => "active_change",
            Self::Play(_) => "play",
            Self::Pause(_) => "pause",
            Self::SortStart(_) => "sort_start",
            Self::SortChange(_) => "sort_change",
            Self::SortBeforeStop(_) => "sort_before_stop",
            Self::Remove { .. } => "remove",
            Self::Empty => "empty",
        }
    }

    pub fn entry(&self) -> Option<&'a QueueEntry> {
        match *self {
            Self::ActiveChange(e)
            | Self::Play(e)
            | Self::Pause(e)
            | Self::SortStart(e)
            | Self::SortChange(e)
            | Self::SortBeforeStop(e) => Some(e),
            Self::Remove { entry, .. } => Some(entry),
            Self::Empty => None,
        }
    }
}

impl std::fmt::Display for QueueEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remove { entry, index } => write!(
                f,
                "remove {} [{}] {}",
                entry.id(),
                index,
                entry.track().display_title()
            ),
            Self::Empty => write!(f, "empty"),
            other => match other.entry() {
                Some(e) => write!(f, "{} {} {}", other.name(), e.id(), e.track().display_title()),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}

type EntryHandler = Box<dyn FnMut(&QueueEntry)>;
type RemoveHandler = Box<dyn FnMut(&QueueEntry, usize)>;
type EmptyHandler = Box<dyn FnMut()>;
type AnyHandler = Box<dyn FnMut(&QueueEvent<'_>)>;

/// Callback configuration. Every handler is optional; unset handlers are no-ops.
///
/// Handlers run synchronously, inside the transition that fired them, and see
/// the queue through shared references only.
#[derive(Default)]
pub struct Handlers {
    on_active_change: Option<EntryHandler>,
    on_play: Option<EntryHandler>,
    on_pause: Option<EntryHandler>,
    on_sort_start: Option<EntryHandler>,
    on_sort_change: Option<EntryHandler>,
    on_sort_before_stop: Option<EntryHandler>,
    on_remove: Option<RemoveHandler>,
    on_empty: Option<EmptyHandler>,
    on_any: Option<AnyHandler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_active_change(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_active_change = Some(Box::new(f));
        self
    }

    pub fn on_play(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_play = Some(Box::new(f));
        self
    }

    pub fn on_pause(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_pause = Some(Box::new(f));
        self
    }

    pub fn on_sort_start(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_sort_start = Some(Box::new(f));
        self
    }

    pub fn on_sort_change(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(f));
        self
    }

    pub fn on_sort_before_stop(mut self, f: impl FnMut(&QueueEntry) + 'static) -> Self {
        self.on_sort_before_stop = Some(Box::new(f));
        self
    }

    /// Called with the removed entry and the index it held before removal.
    pub fn on_remove(mut self, f: impl FnMut(&QueueEntry, usize) + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    pub fn on_empty(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_empty = Some(Box::new(f));
        self
    }

    /// Catch-all observer, called after the specific handler for every event.
    pub fn on_any(mut self, f: impl FnMut(&QueueEvent<'_>) + 'static) -> Self {
        self.on_any = Some(Box::new(f));
        self
    }

    pub(crate) fn emit(&mut self, event: QueueEvent<'_>) {
        tracing::debug!(event = event.name(), "queue event");
        let specific = match event {
            QueueEvent::ActiveChange(_) => self.on_active_change.as_mut(),
            QueueEvent::Play(_) => self.on_play.as_mut(),
            QueueEvent::Pause(_) => self.on_pause.as_mut(),
            QueueEvent::SortStart(_) => self.on_sort_start.as_mut(),
            QueueEvent::SortChange(_) => self.on_sort_change.as_mut(),
            QueueEvent::SortBeforeStop(_) => self.on_sort_before_stop.as_mut(),
            QueueEvent::Remove { entry, index } => {
                if let Some(f) = self.on_remove.as_mut() {
                    f(entry, index);
                }
                None
            }
            QueueEvent::Empty => {
                if let Some(f) = self.on_empty.as_mut() {
                    f();
                }
                None
            }
        };
        if let (Some(f), Some(entry)) = (specific, event.entry()) {
            f(entry);
        }
        if let Some(f) = self.on_any.as_mut() {
            f(&event);
        }
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("on_active_change", &self.on_active_change.is_some())
            .field("on_play", &self.on_play.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_sort_start", &self.on_sort_start.is_some())
            .field("on_sort_change", &self.on_sort_change.is_some())
            .field("on_sort_before_stop", &self.on_sort_before_stop.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .field("on_empty", &self.on_empty.is_some())
            .field("on_any", &self.on_any.is_some())
            .finish()
    }
}
