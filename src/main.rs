// focal - keyboard-driven Hacker News focus-stream reader
//
// One story or comment holds focus at a time; everything else is a key press
// away. Architecture:
// - api: read-only gateway over the Firebase and Algolia HN endpoints
// - store: durable focus positions (top story, per-parent reply index)
// - nav: selection state machine and key->intent translation
// - tui (ratatui): the terminal interface and its event loop
// - events: mpsc messages from background fetch tasks to the TUI

mod api;
mod cli;
mod config;
mod events;
mod item;
mod logging;
mod nav;
mod store;
mod tui;
mod util;

use anyhow::Result;
use api::HnClient;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use store::FocusStore;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    if cli::handle_cli() {
        return Ok(());
    }

    // First run drops a commented config template
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs are captured into a buffer and shown in the `L` overlay; writing
    // them to stdout would garble the alternate screen
    let log_buffer = LogBuffer::new();

    // RUST_LOG wins over the config file level
    let default_filter = format!("focal={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Optional file logging: non-blocking writer with rotation. The guard
    // must stay alive for the duration of the program so logs flush.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    tracing::info!("focal {} starting", config::VERSION);

    let client = HnClient::new(
        &config.api.base_url,
        &config.api.enrich_url,
        config.api.timeout_secs,
    );
    let focus_store = FocusStore::load();

    // Channel from background fetch tasks to the TUI event loop
    let (event_tx, event_rx) = mpsc::channel(64);

    let app = tui::app::App::new(config, client, focus_store, event_tx, log_buffer);
    tui::run_tui(app, event_rx).await
}
