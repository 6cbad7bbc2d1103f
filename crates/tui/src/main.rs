//! GRC TUI - terminal browser for GRC registers.
//!
//! Responsibilities:
//! - Orchestrate application startup and shutdown.
//! - Initialize logging, metrics, configuration and the terminal.
//! - Run the main event loop for the selected register.
//!
//! Does NOT handle:
//! - HTTP or envelope parsing (see `crates/client`).
//! - Filtering, pagination or metrics logic (see `crates/listview`).
//! - Async API calls (see `runtime::side_effects`).
//!
//! Invariants:
//! - `load_dotenv()` runs before CLI parsing.
//! - Logs go to a daily-rolling file; the terminal belongs to the UI.
//! - The terminal is restored on exit, including on panic.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use grc_client::{GrcClient, Resource, with_resource};
use grc_config::ConfigLoader;
use grc_config::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_UI_TICK_MS};
use grc_tui::action::Action;
use grc_tui::app::App;
use grc_tui::cli::Cli;
use grc_tui::runtime::config::{create_client, load_config};
use grc_tui::runtime::side_effects::handle_side_effects;
use grc_tui::runtime::terminal::TerminalGuard;
use tokio::sync::mpsc::{Sender, channel};
use tracing_appender::non_blocking;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    ConfigLoader::new()
        .load_dotenv()
        .context("Failed to load environment")?;

    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.log_dir)
        .with_context(|| format!("Failed to create log directory {}", cli.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "grc-tui.log");
    // The guard must live for all of main() so buffered logs are flushed
    let (non_blocking, _log_guard) = non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let _metrics_exporter = match cli.metrics_bind.as_deref() {
        Some(bind_addr) => match grc_client::MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                tracing::error!("Failed to start metrics exporter: {}", e);
                None
            }
        },
        None => None,
    };
    let metrics_enabled = _metrics_exporter.is_some();

    let config = load_config(&cli)?;
    let client = create_client(&config, metrics_enabled)?;
    tracing::info!(
        register = %cli.resource,
        base_url = %config.connection.base_url,
        "Starting TUI"
    );

    let session = Session {
        config: config.list,
        client,
        no_mouse: cli.no_mouse,
        metrics_enabled,
    };
    with_resource!(cli.resource, |R| run::<R>(session).await)
}

struct Session {
    config: grc_config::ListConfig,
    client: GrcClient,
    no_mouse: bool,
    metrics_enabled: bool,
}

async fn run<T: Resource>(session: Session) -> Result<()> {
    let (terminal_guard, mut terminal) = TerminalGuard::enter(session.no_mouse)?;

    let (tx, mut rx) = channel::<Action<T>>(DEFAULT_CHANNEL_CAPACITY);
    spawn_input_task(tx.clone());

    let mut app = App::<T>::new(session.config);
    handle_side_effects(app.refresh(), session.client.clone(), tx.clone()).await;

    let mut tick_interval = tokio::time::interval(Duration::from_millis(DEFAULT_UI_TICK_MS));

    loop {
        let render_start = Instant::now();
        terminal.draw(|f| app.render(f))?;
        if session.metrics_enabled {
            metrics::histogram!("grc_tui_frame_render_duration_seconds")
                .record(render_start.elapsed().as_secs_f64());
        }

        let next = tokio::select! {
            Some(action) = rx.recv() => app.update(action),
            _ = tick_interval.tick() => app.tick(Instant::now()),
        };

        match next {
            Some(Action::Quit) => break,
            Some(action) if action.is_side_effect() => {
                handle_side_effects(action, session.client.clone(), tx.clone()).await;
            }
            Some(_) | None => {}
        }
    }

    terminal.show_cursor()?;
    drop(terminal_guard);
    tracing::info!("TUI exited");
    Ok(())
}

/// Forward key presses and resizes from the terminal into the action channel.
fn spawn_input_task<T: Resource>(tx: Sender<Action<T>>) {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(event) = reader.next().await {
            let action = match event {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Action::Input(key),
                Ok(Event::Resize(width, height)) => Action::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!("Terminal input stream failed: {}", e);
                    break;
                }
            };
            // Key presses are never dropped; wait for room in the channel
            if tx.send(action).await.is_err() {
                break;
            }
        }
    });
}
