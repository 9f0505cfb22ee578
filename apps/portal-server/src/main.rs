use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use portalkit::HostRuntime;
use portalkit::config::load_config;
use portalkit::logging::init_logging;
use tracing::{error, info};

mod registered_modules;

#[derive(Debug, Parser)]
#[command(name = "portal-server", version, about = "Developer portal backend")]
struct Cli {
    /// YAML configuration file. `PORTAL__*` environment variables override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Initialize all enabled modules and serve HTTP (default).
    Run,
    /// Validate configuration and print the module init order.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging)?;

    let runtime = HostRuntime::new(config, registered_modules::all())
        .context("invalid module configuration")?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Check => {
            println!("configuration OK; modules in init order:");
            for name in runtime.registry().names() {
                println!("  {name}");
            }
            Ok(())
        }
        Command::Run => {
            info!(
                version = env!("CARGO_PKG_VERSION"),
                modules = ?runtime.registry().names(),
                "Starting portal server"
            );

            let shutdown = runtime.cancellation_token();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => info!("Shutdown signal received"),
                    Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
                }
                shutdown.cancel();
            });

            runtime.run().await
        }
    }
}
