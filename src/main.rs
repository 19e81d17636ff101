//! Visual Timer - a floating dial countdown timer
//!
//! Drag around the dial to set up to 60 minutes, release to start the
//! countdown, tap to pause or resume. An alarm plays when it reaches zero.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use visual_timer::cli::Cli;
use visual_timer::ui::VisualTimerApp;

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Starts the tick runtime and runs the window until it closes.
fn run(cli: Cli) -> Result<()> {
    // The UI owns the main thread; ticks run on a single worker
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("visual-timer-ticker")
        .enable_time()
        .build()
        .context("failed to create the tick runtime")?;

    let window = cli.window_config();
    let alarm = cli.alarm_settings();
    let options = window.native_options();
    let title = window.title.clone();
    let handle = runtime.handle().clone();

    debug!(side = window.initial_side(), floating = window.floating, "Opening window");

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(VisualTimerApp::new(cc, handle, window, &alarm)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to open the timer window: {err}"))?;

    debug!("Window closed");
    Ok(())
}
