// Active-entry state machine: drop-in, removal, reorder, play/pause, navigation.

use std::cell::RefCell;
use std::rc::Rc;

use playlist_queue::{EntryState, Handlers, PlaylistQueue, QueueEvent, Track};

// ── Helpers ──────────────────────────────────────────────────────────────────

type EventLog = Rc<RefCell<Vec<String>>>;

fn label(event: &QueueEvent<'_>) -> String {
    match event {
        QueueEvent::Remove { entry, index } => {
            format!("remove:{}@{}", entry.track().song.title, index)
        }
        QueueEvent::Empty => "empty".to_string(),
        other => match other.entry() {
            Some(e) => format!("{}:{}", other.name(), e.track().song.title),
            None => other.name().to_string(),
        },
    }
}

fn recording_queue() -> (PlaylistQueue, EventLog) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let handlers = Handlers::new().on_any(move |event| sink.borrow_mut().push(label(event)));
    (PlaylistQueue::new(handlers), log)
}

fn track(song: &str) -> Track {
    Track::new("Artist", "Album", song).with_thumbnail(format!("/thumbs/{song}.jpg"))
}

/// Queue with songs appended in order; the first one ends up active and playing.
fn queue_with(songs: &[&str]) -> (PlaylistQueue, EventLog) {
    let (mut q, log) = recording_queue();
    for song in songs {
        q.drop_in(track(song), q.len());
    }
    log.borrow_mut().clear();
    (q, log)
}

fn drain(log: &EventLog) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

fn current_song(q: &PlaylistQueue) -> Option<String> {
    q.current().map(|e| e.track().song.title.clone())
}

fn assert_single_active(q: &PlaylistQueue) {
    let active = q.entries().iter().filter(|e| e.is_active()).count();
    assert!(active <= 1, "{active} active entries");
    if !q.is_empty() {
        assert_eq!(active, 1, "non-empty queue without an active entry");
    }
}

// ── Drop-in ──────────────────────────────────────────────────────────────────

#[test]
fn test_drop_into_empty_queue_plays_it() {
    let (mut q, log) = recording_queue();
    let id = q.drop_in(track("a"), 0);

    assert_eq!(q.len(), 1);
    assert!(q.is_playing());
    assert_eq!(q.current().unwrap().id(), id);
    assert_eq!(q.current().unwrap().state(), EntryState::ActivePlaying);
    assert_eq!(drain(&log), ["active_change:a", "play:a"]);
}

#[test]
fn test_drop_into_occupied_queue_keeps_active() {
    let (mut q, log) = queue_with(&["a"]);
    q.drop_in(track("b"), 1);

    assert_eq!(current_song(&q).as_deref(), Some("a"));
    assert!(drain(&log).is_empty());
    assert!(!q.get(1).unwrap().is_active());
}

#[test]
fn test_drop_into_queue_with_paused_active() {
    let (mut q, log) = queue_with(&["a"]);
    let active = q.current().unwrap().id();
    q.pause();
    drain(&log);

    q.drop_in(track("b"), 0);

    assert!(drain(&log).is_empty());
    assert!(!q.is_playing());
    assert_eq!(q.current().unwrap().id(), active);
    assert_eq!(q.current().unwrap().state(), EntryState::ActivePaused);
    assert_eq!(q.get(0).unwrap().state(), EntryState::Inactive);
}

#[test]
fn test_drop_before_active_shifts_its_index() {
    let (mut q, _log) = queue_with(&["a", "b"]);
    q.drop_in(track("z"), 0);

    assert_eq!(q.active_index(), Some(1));
    assert_eq!(current_song(&q).as_deref(), Some("a"));
}

#[test]
fn test_drop_past_end_appends() {
    let (mut q, _log) = queue_with(&["a"]);
    q.drop_in(track("b"), 10);
    assert_eq!(q.get(1).unwrap().track().song.title, "b");
}

#[test]
fn test_metadata_passes_through_unchanged() {
    let (mut q, _log) = recording_queue();
    let t = track("a");
    q.drop_in(t.clone(), 0);
    assert_eq!(q.get(0).unwrap().track(), &t);
}

// ── Removal ──────────────────────────────────────────────────────────────────

#[test]
fn test_remove_only_entry_empties_queue() {
    let (mut q, log) = queue_with(&["a"]);
    let removed = q.remove(0).unwrap();

    assert_eq!(removed.track().song.title, "a");
    assert!(q.is_empty());
    assert!(q.current().is_none());
    assert!(!q.is_playing());
    assert_eq!(drain(&log), ["remove:a@0", "empty"]);
}

#[test]
fn test_remove_active_middle_selects_shifted_entry() {
    let (mut q, log) = queue_with(&["a", "b", "c"]);
    q.set_active(1);
    drain(&log);

    q.remove(1);

    assert_eq!(q.active_index(), Some(1));
    assert_eq!(current_song(&q).as_deref(), Some("c"));
    assert!(q.is_playing());
    assert_eq!(drain(&log), ["remove:b@1", "active_change:c", "play:c"]);
}

#[test]
fn test_remove_active_last_selects_new_last() {
    let (mut q, log) = queue_with(&["a", "b", "c"]);
    q.set_active(2);
    drain(&log);

    q.remove(2);

    assert_eq!(q.active_index(), Some(1));
    assert_eq!(current_song(&q).as_deref(), Some("b"));
    assert_eq!(drain(&log), ["remove:c@2", "active_change:b", "play:b"]);
}

#[test]
fn test_remove_active_first_selects_next() {
    let (mut q, _log) = queue_with(&["a", "b", "c"]);
    q.remove(0);
    assert_eq!(q.active_index(), Some(0));
    assert_eq!(current_song(&q).as_deref(), Some("b"));
}

#[test]
fn test_remove_inactive_entry_keeps_active() {
    let (mut q, log) = queue_with(&["a", "b", "c"]);
    q.set_active(1);
    drain(&log);

    q.remove(0);

    assert_eq!(current_song(&q).as_deref(), Some("b"));
    assert_eq!(q.active_index(), Some(0));
    assert_eq!(drain(&log), ["remove:a@0"]);
}

#[test]
fn test_remove_paused_active_reselects_and_plays() {
    let (mut q, log) = queue_with(&["a", "b"]);
    q.pause();
    drain(&log);

    q.remove(0);

    assert!(q.is_playing());
    assert_eq!(drain(&log), ["remove:a@0", "active_change:b", "play:b"]);
}

#[test]
fn test_remove_out_of_bounds_is_noop() {
    let (mut q, log) = queue_with(&["a"]);
    assert!(q.remove(3).is_none());
    assert_eq!(q.len(), 1);
    assert!(drain(&log).is_empty());
}

#[test]
fn test_remove_entry_by_id() {
    let (mut q, _log) = queue_with(&["a", "b"]);
    let id = q.get(1).unwrap().id();
    let removed = q.remove_entry(id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(q.find(id).is_none());
    assert!(q.remove_entry(id).is_none());
}

#[test]
fn test_insert_then_remove_all_fires_empty_once() {
    let (mut q, log) = queue_with(&["a", "b", "c", "d", "e"]);
    for index in [2, 0, 1, 1, 0] {
        assert!(q.remove(index).is_some());
        assert_single_active(&q);
    }

    let events = drain(&log);
    assert_eq!(q.len(), 0);
    assert_eq!(events.iter().filter(|e| *e == "empty").count(), 1);
    assert_eq!(events.last().map(String::as_str), Some("empty"));
}

#[test]
fn test_queue_reusable_after_empty() {
    let (mut q, log) = queue_with(&["a"]);
    q.remove(0);
    drain(&log);

    q.drop_in(track("b"), 0);
    assert_eq!(current_song(&q).as_deref(), Some("b"));
    assert_eq!(drain(&log), ["active_change:b", "play:b"]);
}

// ── Reorder ──────────────────────────────────────────────────────────────────

#[test]
fn test_reorder_active_follows_identity() {
    let (mut q, log) = queue_with(&["a", "b", "c"]);
    let id = q.current().unwrap().id();

    assert!(q.reorder(0, 2));

    assert_eq!(q.active_index(), Some(2));
    assert_eq!(q.current().unwrap().id(), id);
    assert!(q.get(2).unwrap().is_active());
    assert!(q.is_playing());
    assert_eq!(drain(&log), ["sort_change:a"]);
}

#[test]
fn test_reorder_other_entry_around_active() {
    let (mut q, _log) = queue_with(&["a", "b", "c"]);
    q.set_active(1);
    q.reorder(2, 0);
    assert_eq!(current_song(&q).as_deref(), Some("b"));
    assert_eq!(q.active_index(), Some(2));
}

#[test]
fn test_reorder_same_position_is_rejected() {
    let (mut q, log) = queue_with(&["a", "b"]);
    assert!(!q.reorder(1, 1));
    assert!(!q.reorder(5, 0));
    assert!(drain(&log).is_empty());
}

// ── Play / pause ─────────────────────────────────────────────────────────────

#[test]
fn test_pause_then_play() {
    let (mut q, log) = queue_with(&["a"]);

    assert!(q.pause().is_some());
    assert!(!q.is_playing());
    assert_eq!(q.current().unwrap().state(), EntryState::ActivePaused);

    assert!(q.play().is_some());
    assert!(q.is_playing());
    assert_eq!(drain(&log), ["pause:a", "play:a"]);
}

#[test]
fn test_pause_fires_even_when_already_paused() {
    let (mut q, log) = queue_with(&["a"]);
    q.pause();
    q.pause();
    assert_eq!(drain(&log), ["pause:a", "pause:a"]);
    assert!(!q.is_playing());
}

#[test]
fn test_play_while_playing_still_announces() {
    let (mut q, log) = queue_with(&["a"]);
    assert!(q.play().is_some());
    assert!(q.is_playing());
    assert_eq!(drain(&log), ["play:a"]);
}

#[test]
fn test_play_and_pause_without_active_entry() {
    let (mut q, log) = recording_queue();
    assert!(q.play().is_none());
    assert!(q.pause().is_none());
    assert!(drain(&log).is_empty());
}

#[test]
fn test_set_active_twice_is_idempotent() {
    let (mut q, log) = queue_with(&["a", "b"]);

    assert!(q.set_active(1).is_some());
    assert_eq!(drain(&log), ["active_change:b", "play:b"]);

    assert!(q.set_active(1).is_none());
    assert!(drain(&log).is_empty());
    assert_single_active(&q);
}

#[test]
fn test_set_active_clears_previous_entry() {
    let (mut q, _log) = queue_with(&["a", "b"]);
    q.set_active(1);
    assert_eq!(q.get(0).unwrap().state(), EntryState::Inactive);
    assert_eq!(q.get(1).unwrap().state(), EntryState::ActivePlaying);
}

#[test]
fn test_set_active_on_paused_active_reactivates() {
    let (mut q, log) = queue_with(&["a"]);
    q.pause();
    drain(&log);

    assert!(q.set_active(0).is_some());
    assert!(q.is_playing());
    assert_eq!(drain(&log), ["active_change:a", "play:a"]);
}

#[test]
fn test_set_active_out_of_bounds() {
    let (mut q, log) = queue_with(&["a"]);
    assert!(q.set_active(1).is_none());
    assert_eq!(current_song(&q).as_deref(), Some("a"));
    assert!(drain(&log).is_empty());
}

#[test]
fn test_play_and_pause_entry_buttons() {
    let (mut q, log) = queue_with(&["a", "b"]);
    let a = q.get(0).unwrap().id();
    let b = q.get(1).unwrap().id();

    assert!(q.pause_entry(b).is_none());
    assert!(q.play_entry(b).is_some());
    assert!(q.pause_entry(b).is_some());
    assert!(q.pause_entry(a).is_none());

    assert_eq!(drain(&log), ["active_change:b", "play:b", "pause:b"]);
}

#[test]
fn test_artist_link_resolves_without_events() {
    let (mut q, log) = recording_queue();
    let id = q.drop_in(Track::new("Nina Simone", "Pastel Blues", "Sinnerman"), 0);
    drain(&log);

    assert_eq!(q.goto_artist(id).map(|a| a.title.as_str()), Some("Nina Simone"));
    assert!(drain(&log).is_empty());

    q.remove_entry(id);
    assert!(q.goto_artist(id).is_none());
}

#[test]
fn test_active_change_fires_before_play() {
    let order: EventLog = Rc::new(RefCell::new(Vec::new()));
    let (o1, o2) = (order.clone(), order.clone());
    let handlers = Handlers::new()
        .on_play(move |_| o1.borrow_mut().push("play".into()))
        .on_active_change(move |_| o2.borrow_mut().push("active_change".into()));
    let mut q = PlaylistQueue::new(handlers);

    q.drop_in(track("a"), 0);

    assert_eq!(*order.borrow(), ["active_change", "play"]);
}

#[test]
fn test_remove_handler_gets_pre_removal_index() {
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let mut q = PlaylistQueue::new(Handlers::new().on_remove(move |entry, index| {
        *sink.borrow_mut() = Some((entry.track().song.title.clone(), index));
    }));
    for song in ["a", "b", "c"] {
        q.drop_in(track(song), q.len());
    }

    q.remove(2);

    assert_eq!(seen.borrow().clone(), Some(("c".to_string(), 2)));
}

#[test]
fn test_empty_handler_called_once() {
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    let mut q = PlaylistQueue::new(Handlers::new().on_empty(move || *sink.borrow_mut() += 1));
    q.drop_in(track("a"), 0);
    q.drop_in(track("b"), 0);

    q.remove(0);
    assert_eq!(*count.borrow(), 0);
    q.remove(0);
    assert_eq!(*count.borrow(), 1);
}

// ── Navigation ───────────────────────────────────────────────────────────────

#[test]
fn test_get_next_and_previous() {
    let (mut q, _log) = queue_with(&["a", "b", "c"]);
    q.set_active(1);
    assert_eq!(q.next().unwrap().track().song.title, "c");
    assert_eq!(q.previous().unwrap().track().song.title, "a");
    assert_eq!(current_song(&q).as_deref(), Some("b"));
}

#[test]
fn test_no_wraparound_at_ends() {
    let (mut q, _log) = queue_with(&["a", "b", "c"]);
    assert!(q.previous().is_none());
    q.set_active(2);
    assert!(q.next().is_none());
}

#[test]
fn test_lookups_on_empty_queue() {
    let (q, _log) = recording_queue();
    assert!(q.current().is_none());
    assert!(q.next().is_none());
    assert!(q.previous().is_none());
    assert!(q.get(0).is_none());
    assert_eq!(q.len(), 0);
}

#[test]
fn test_set_next_advances_and_plays() {
    let (mut q, log) = queue_with(&["a", "b"]);
    q.pause();
    drain(&log);

    let next = q.set_next().map(|e| e.track().song.title.clone());

    assert_eq!(next.as_deref(), Some("b"));
    assert!(q.is_playing());
    assert_eq!(q.get(0).unwrap().state(), EntryState::Inactive);
    assert_eq!(drain(&log), ["active_change:b", "play:b"]);
}

#[test]
fn test_set_next_at_end_and_previous_at_start() {
    let (mut q, log) = queue_with(&["a", "b"]);
    assert!(q.set_previous().is_none());
    q.set_active(1);
    drain(&log);

    assert!(q.set_next().is_none());
    assert!(drain(&log).is_empty());

    assert_eq!(
        q.set_previous().map(|e| e.track().song.title.clone()).as_deref(),
        Some("a")
    );
}

// ── Invariants ───────────────────────────────────────────────────────────────

#[test]
fn test_single_active_across_mixed_sequence() {
    let (mut q, _log) = recording_queue();
    q.drop_in(track("a"), 0);
    assert_single_active(&q);
    q.drop_in(track("b"), 0);
    assert_single_active(&q);
    q.drop_in(track("c"), 1);
    assert_single_active(&q);
    q.set_active(2);
    assert_single_active(&q);
    q.reorder(2, 0);
    assert_single_active(&q);
    q.pause();
    assert_single_active(&q);
    q.set_next();
    assert_single_active(&q);
    q.remove(1);
    assert_single_active(&q);
    q.reorder(0, 1);
    assert_single_active(&q);
    q.remove(1);
    assert_single_active(&q);
    q.remove(0);
    assert_single_active(&q);
    assert!(q.is_empty());
}

#[test]
fn test_ids_unique_for_queue_lifetime() {
    let (mut q, _log) = recording_queue();
    let first = q.drop_in(track("a"), 0);
    q.remove(0);
    let second = q.drop_in(track("a"), 0);
    assert_ne!(first, second);
}
