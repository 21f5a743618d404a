//! poelog server - tails the game client log and relays parsed messages
//! over HTTP/WebSocket.

use anyhow::Result;
use clap::Parser;
use poelog_core::LogSink;
use poelog_server::{build_router, config::Config, logging, state::AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use logging::{LogConfig, LogFormat};

/// poelog server - Path of Exile log companion.
#[derive(Parser, Debug)]
#[command(name = "poelog-server")]
#[command(about = "Tails the Path of Exile client log and serves parsed messages")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log file to tail
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable verbose logging (INFO level for most targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (includes per-poll traces)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "parser=debug").
    /// Can be specified multiple times.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(log_file) = cli.log_file {
        if let Some(dir) = log_file.parent() {
            config.log_dir = dir.to_path_buf();
        }
        if let Some(name) = log_file.file_name() {
            config.log_file = name.to_string_lossy().into_owned();
        }
    }

    tracing::info!(
        target: "poelog::startup",
        "Tailing {} (poll every {}ms)",
        config.log_file_path().display(),
        config.poll_interval_ms
    );

    let state = Arc::new(AppState::new(config.clone(), Arc::new(LogSink))?);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "poelog::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
