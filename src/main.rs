//! MCP Server Entry Point
//!
//! Initializes logging, then loads configuration (environment first, then
//! command-line overrides) and starts the server with the configured transport.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use graph_mcp_server::core::{Config, LoggingConfig, McpServer, TransportService};

/// Microsoft Graph MCP server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Only register tools that do not modify data (GET endpoints)
    #[arg(long)]
    read_only: bool,

    /// Endpoint catalog JSON file (defaults to the embedded catalog)
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Logging settings from the environment with `-v` applied.
    fn logging(&self) -> LoggingConfig {
        let mut logging = LoggingConfig::from_env();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        logging
    }

    /// Apply command-line overrides on top of the environment configuration.
    fn apply(self, config: &mut Config) {
        if self.read_only {
            config.graph.read_only = true;
        }
        if let Some(path) = self.catalog {
            config.graph.catalog_path = Some(path);
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Must precede Config::from_env, which logs.
    let logging = cli.logging();
    init_logging(&logging.level, logging.with_timestamps);

    let mut config = Config::from_env();
    cli.apply(&mut config);

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.graph.read_only {
        info!("Read-only mode: write tools are not registered");
    }

    let server = McpServer::new(config.clone()).context("failed to initialize server")?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for the STDIO transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
