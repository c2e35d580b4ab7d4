//! HTTP quest server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                     HTTP QUEST                       │
//!                    │                                                      │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌──────────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│  level   │──▶│  X-Password gate │  │
//!                    │  │ server  │   │  route   │   │  (per level)     │  │
//!                    │  └─────────┘   └────┬─────┘   └────────┬─────────┘  │
//!                    │                405 ◀┘                  ▼            │
//!                    │                               ┌──────────────────┐  │
//!                    │                               │  level handler   │  │
//!                    │                               │  quest::{vault,  │  │
//!   Client Response  │                               │  transform, ...} │  │
//!   ◀────────────────┼───────────────────────────────┴──────────────────┘  │
//!                    │                                                      │
//!                    │  config · observability · lifecycle                  │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use http_quest::config::{load_config, QuestConfig};
use http_quest::lifecycle::{self, Shutdown};
use http_quest::observability::logging;

#[derive(Parser)]
#[command(name = "http-quest")]
#[command(about = "Password-gated HTTP challenge server", long_about = None, version)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => QuestConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "http-quest starting"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    lifecycle::serve(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
