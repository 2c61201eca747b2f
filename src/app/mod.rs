// Central coordinator: owns the playlist queue and the drag gesture in flight.
// Runs the event loop (input line → Action → handle_action → queue → printed events).

mod actions;
mod output;

use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::action::Action;
use crate::config::{Config, EventFormat};
use crate::player::gesture::SortSession;
use crate::player::{Handlers, PlaylistQueue};

/// Where action lines come from.
#[derive(Debug, Clone)]
pub enum InputSource {
    Stdin,
    Script(PathBuf),
}

/// Top-level coordinator: owns the queue and routes every action to it.
/// Queue events and query results are collected as output lines.
pub struct App {
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    output_tx: mpsc::UnboundedSender<String>,
    output_rx: mpsc::UnboundedReceiver<String>,

    pub queue: PlaylistQueue,
    pub(crate) session: Option<SortSession>,
    pub(crate) config: Config,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let mut handlers = Handlers::new();
        if config.events.echo {
            let tx = output_tx.clone();
            let format = config.events.format;
            handlers = handlers.on_any(move |event| {
                let line = match format {
                    EventFormat::Text => event.to_string(),
                    EventFormat::Json => serde_json::to_string(event)
                        .unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#)),
                };
                tx.send(line).ok();
            });
        }

        Self {
            running: true,
            action_tx,
            action_rx,
            output_tx,
            output_rx,
            queue: PlaylistQueue::new(handlers),
            session: None,
            config,
            error_message: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed actions from `source` through the loop until input ends or `quit`,
    /// writing every output line to `out`.
    pub async fn run<W>(&mut self, source: InputSource, out: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.spawn_reader(source);

        while self.running {
            let Some(action) = self.action_rx.recv().await else {
                break;
            };
            self.handle_action(action)?;
            for line in self.take_output() {
                out.write_all(line.as_bytes()).await?;
                out.write_all(b"\n").await?;
            }
        }

        out.flush().await?;
        Ok(())
    }

    /// Drain queued output lines, oldest first.
    pub fn take_output(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.output_rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    pub(crate) fn emit_line(&self, line: String) {
        self.output_tx.send(line).ok();
    }

    fn spawn_reader(&self, source: InputSource) {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match source {
                InputSource::Stdin => read_actions(BufReader::new(tokio::io::stdin()), &tx).await,
                InputSource::Script(path) => match tokio::fs::File::open(&path).await {
                    Ok(file) => read_actions(BufReader::new(file), &tx).await,
                    Err(e) => Err(anyhow::Error::from(e)
                        .context(format!("opening script {}", path.display()))),
                },
            };
            if let Err(e) = result {
                tx.send(Action::ShowError(format!("{e:#}"))).ok();
            }
            tx.send(Action::Quit).ok();
        });
    }
}

async fn read_actions<R>(reader: R, tx: &mpsc::UnboundedSender<Action>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match Action::parse_line(&line) {
            Ok(Some(action)) => {
                if tx.send(action).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("{e:#}");
                tx.send(Action::ShowError(format!("{e:#}"))).ok();
            }
        }
    }
    Ok(())
}
