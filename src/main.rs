//! Flight lookup service - main entry point

use clap::{Parser, Subcommand};
use flightbot::config::ServiceConfig;
use flightbot::lifecycle_span;
use flightbot::observability::init_default_logging;
use flightbot::tools::ToolRegistry;
use flightbot::transport::LookupService;
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, Instrument};

/// Flight lookup tool service
#[derive(Parser)]
#[command(name = "flightbot")]
#[command(about = "Single-tool flight lookup service served over MCP stdio")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the service on standard input/output
    Run,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!(
        "Starting flight lookup service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match load_configuration(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_service(config).await,
        Commands::Config { show } => handle_config_command(config, show).await,
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    info!("Service shutdown complete");
}

async fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(ServiceConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations
            let default_paths = vec!["flightbot.toml", "config/flightbot.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(ServiceConfig::load_from_file(&path)?);
                }
            }

            // No external state is required to answer lookups, so a missing
            // config file falls back to the built-in single-tool service
            info!("No configuration file found, using built-in defaults");
            Ok(ServiceConfig::default())
        }
    }
}

async fn run_service(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Service starting with id: {}", config.service.id);

    let (service, registry) = build_service(&config).await?;

    let running = service.serve(stdio()).await?;
    info!("Service is running and waiting for requests on stdio...");

    // Graceful shutdown on signal or transport close (stdin EOF)
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        reason = running.waiting() => {
            match reason {
                Ok(reason) => info!(?reason, "Transport closed"),
                Err(e) => error!("Transport task failed: {}", e),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("Service shutdown initiated");
    registry.write().await.shutdown().await?;
    Ok(())
}

/// Bootstrap factory - builds the handler with an initialized registry.
/// Coupling lives here, separated from the handler's dispatch logic.
async fn build_service(
    config: &ServiceConfig,
) -> Result<(LookupService, Arc<RwLock<ToolRegistry>>), Box<dyn std::error::Error>> {
    let mut registry = ToolRegistry::new();
    registry
        .initialize(&config.tools)
        .instrument(lifecycle_span!(phase = "initialize"))
        .await?;
    info!(tools = ?registry.list_tools(), "Tool registry initialized");

    let registry = Arc::new(RwLock::new(registry));
    let service = LookupService::new(config.service.clone(), registry.clone());
    Ok((service, registry))
}

async fn handle_config_command(
    config: ServiceConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}
