//! semandoc-mcp: MCP server for a SemanDoc document knowledge base
//!
//! Exposes the knowledge base HTTP API as tools over stdio so that AI
//! assistants can manage and search documents.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use semandoc_mcp::backend::HttpBackend;
use semandoc_mcp::config::{self, BackendConfig};
use semandoc_mcp::mcp::server::McpServer;

/// MCP server for a SemanDoc document knowledge base.
///
/// Lets AI assistants create, search, fetch, list and delete documents and
/// read corpus statistics through MCP tools.
#[derive(Parser, Debug)]
#[command(name = "semandoc-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Knowledge base host [default: localhost]
    #[arg(long)]
    host: Option<String>,

    /// Knowledge base port [default: 17548]
    #[arg(long)]
    port: Option<u16>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Everything goes to stderr; stdout carries protocol frames only.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the semandoc-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let backend_config = Arc::new(BackendConfig::resolve(
        args.host.as_deref(),
        args.port,
        &cfg.backend,
    ));

    eprintln!("SemanDoc backend: {}", backend_config.base_url());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = backend_config.base_url(),
        "Starting semandoc-mcp server"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let backend = match HttpBackend::new(backend_config) {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = %e, "Failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let mut server = McpServer::new(backend);

    eprintln!("SemanDoc MCP Server running on stdio");

    match runtime.block_on(server.run()) {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Fatal error in server loop");
            ExitCode::FAILURE
        }
    }
}
