// Action dispatch: routes each Action variant to the queue.

use tracing::{info, warn};

use crate::action::Action;
use crate::app::App;
use crate::player::gesture::{GestureOutcome, SortSession};

impl App {
    pub fn handle_action(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            // Lifecycle
            Action::Quit => {
                info!(size = self.queue.len(), "shutting down");
                self.running = false;
            }

            // Step-by-step drag gestures
            Action::DragEntry { index } => {
                self.abandon_session();
                self.session = SortSession::begin_reorder(&mut self.queue, index);
                if self.session.is_none() {
                    warn!(index, "drag started on a missing entry");
                }
                self.report_drag_status();
            }
            Action::DragTrack { track } => {
                self.abandon_session();
                self.session = Some(SortSession::begin_drop(track));
                self.report_drag_status();
            }
            Action::DragOver => {
                if let Some(session) = self.session.as_mut() {
                    session.over();
                }
                self.report_drag_status();
            }
            Action::DragOut => {
                if let Some(session) = self.session.as_mut() {
                    session.out();
                }
                self.report_drag_status();
            }
            Action::DragRelease { position } => match self.session.take() {
                Some(session) => {
                    let outcome = session.finish(&mut self.queue, position);
                    self.report_outcome(&outcome);
                }
                None => warn!(position, "release without a drag in progress"),
            },

            // Completed gestures
            Action::DropIn { track, position } => {
                self.queue.drop_in(track, position);
            }
            Action::Reorder { from, to } => {
                if let Some(session) = SortSession::begin_reorder(&mut self.queue, from) {
                    let outcome = session.finish(&mut self.queue, to);
                    self.report_outcome(&outcome);
                }
            }
            Action::Remove { index } => {
                self.queue.remove(index);
            }

            // Playback controls
            Action::Play => {
                self.queue.play();
            }
            Action::Pause => {
                self.queue.pause();
            }
            Action::SetActive { index } => {
                self.queue.set_active(index);
            }
            Action::SetNext => {
                self.queue.set_next();
            }
            Action::SetPrevious => {
                self.queue.set_previous();
            }

            // Per-entry links
            Action::GotoArtist { index } => {
                let artist = self
                    .queue
                    .get(index)
                    .and_then(|entry| self.queue.goto_artist(entry.id()));
                match artist {
                    Some(artist) => self.report_value("artist", artist.title.as_str()),
                    None => self.report_value("artist", "none"),
                }
            }

            // Queries
            Action::GetCurrent => {
                self.report_entry("current", self.queue.active_index(), self.queue.current())
            }
            Action::GetNext => {
                let index = self.queue.active_index().map(|i| i + 1);
                self.report_entry("next", index, self.queue.next());
            }
            Action::GetPrevious => {
                let index = self.queue.active_index().and_then(|i| i.checked_sub(1));
                self.report_entry("previous", index, self.queue.previous());
            }
            Action::GetSize => self.report_value("size", self.queue.len()),
            Action::IsPlaying => self.report_value("playing", self.queue.is_playing()),
            Action::Snapshot => self.report_snapshot(),

            // Errors
            Action::ShowError(msg) => {
                warn!("{msg}");
                self.report_value("error", msg.as_str());
                self.error_message = Some(msg);
            }
        }
        Ok(())
    }

    /// A new drag replaces one that never got a release.
    fn abandon_session(&mut self) {
        if let Some(session) = self.session.take() {
            warn!(source = ?session.source(), "previous drag abandoned without release");
        }
    }

    fn report_outcome(&self, outcome: &GestureOutcome) {
        match outcome {
            GestureOutcome::Discarded(track) => {
                info!(song = %track.song.title, "dropped outside the queue");
            }
            GestureOutcome::Unchanged => info!("drag released without a change"),
            _ => {}
        }
    }
}
