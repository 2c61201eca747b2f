// Entry point: loads config, sets up logging, and replays action lines from
// stdin or a script file through the playlist queue.

use std::path::PathBuf;

use clap::Parser;

use playlist_queue::app::{App, InputSource};
use playlist_queue::config::Config;
use playlist_queue::logging;

#[derive(Parser)]
#[command(name = "playlist-queue", about = "Drag-and-drop playlist queue driver")]
struct Cli {
    /// Read action lines from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Use this config file instead of ~/.config/playlist-queue/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    logging::init(&config)?;

    let source = match cli.script {
        Some(path) => InputSource::Script(path),
        None => InputSource::Stdin,
    };

    let mut app = App::new(config);
    let mut stdout = tokio::io::stdout();
    app.run(source, &mut stdout).await?;

    Ok(())
}
