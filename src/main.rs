//! Application entry point — MedicalBot terminal chat.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the [`ConversationSession`] over the rule synthesizer.
//! 5. Spawn the session event logger.
//! 6. Run the stdin loop until `/quit` or end of input.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use medical_bot::{
    app::{ChatApp, Flow},
    bot::RuleSynthesizer,
    config::AppConfig,
    session::{ConversationSession, SessionEvent},
};

// ---------------------------------------------------------------------------
// Event logger
// ---------------------------------------------------------------------------

/// Drains session events into the log.  The terminal renders from the
/// transcript, so events are only traced here.
async fn log_events(mut rx: mpsc::UnboundedReceiver<SessionEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            SessionEvent::EntryAppended(entry) => {
                log::debug!("event: {:?} entry {}", entry.role(), entry.id());
            }
            SessionEvent::PhaseChanged(phase) => {
                log::debug!("event: phase {}", phase.label());
            }
            SessionEvent::Notice(notice) => log::warn!("event: notice {notice}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input loop
// ---------------------------------------------------------------------------

async fn run(app: ChatApp) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    app.banner(&mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };

        match app.handle_line(&line, &mut stdout).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                log::error!("command failed: {e:#}");
                writeln!(stdout, "Error: {e}")?;
            }
        }
    }

    log::info!("MedicalBot shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("MedicalBot starting up");

    // 2. Configuration
    if AppConfig::is_first_run() {
        log::info!("No settings file found; using defaults");
    }
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Session
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let session = ConversationSession::new(config, Arc::new(RuleSynthesizer::new()))
        .with_events(event_tx);

    // 5. Event logger
    rt.spawn(log_events(event_rx));

    // 6. Input loop
    rt.block_on(run(ChatApp::new(session)))
}
