use arena_stats::console::{parse_command, ConsoleSurface};
use arena_stats::session::config::CONFIG_FILE;
use arena_stats::session::{
    AppConfig, BuildError, ConfigError, Gesture, RunSummary, SessionBuilder, SessionError,
    TickScheduler,
};
use arena_stats::store::{CsvRecordStore, CsvRoster};
use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(summary) => {
            info!(ticks = summary.ticks, screen = ?summary.final_screen, "bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "arena-stats aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<RunSummary, AppError> {
    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let scheduler = TickScheduler::from_config(&config);

    let mut session = SessionBuilder::new()
        .roster_from(&mut CsvRoster::new(&config.roster_path))?
        .store(CsvRecordStore::new(&config.records_path))
        .surface(ConsoleSurface::stdout())
        .config(config)
        .build()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx);

    Ok(scheduler.run(&mut session, &mut rx).await?)
}

/// Read commands from stdin on a plain thread; end of input quits.
fn spawn_stdin_reader(tx: UnboundedSender<Gesture>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(Some(gesture)) => {
                    if tx.send(gesture).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "ignoring input"),
            }
        }
        let _ = tx.send(Gesture::Quit);
    });
}
