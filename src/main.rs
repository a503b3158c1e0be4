//! Padview - windowed gamepad demo with an immediate-mode performance overlay.
//!
//! Opens a window, polls the first connected gamepad every frame, and draws
//! frame statistics plus analog stick values in a translucent overlay.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod config;
mod display;
mod error;
mod gfx;
mod gui;
mod input;
mod overlay;
mod perf;

use crate::app::App;
use crate::config::AppConfig;

/// Padview - gamepad input and performance overlay demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Extra launch arguments; stored and logged for diagnostics only
    #[arg(trailing_var_arg = true)]
    launch_args: Vec<String>,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level)?;

    info!(
        "starting {} v{}",
        config::APP_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let event_loop = EventLoop::new().context("platform subsystem startup failed")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(AppConfig::default(), args.launch_args);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    if let Some(err) = app.take_init_error() {
        return Err(err).context("initialization failed");
    }

    info!("shutdown complete");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
