//! Gatequote CLI - Price industrial doors and gates for customers.
//!
//! Commands:
//! - `gatequote catalog` - List gate types and their products
//! - `gatequote customer` - Manage customers
//! - `gatequote gate` - Quote, save and inspect gates
//! - `gatequote data` - Export, import and clear stored data
//! - `gatequote config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, ConfigArgs, CustomerArgs, DataArgs, GateArgs};

/// Gatequote - Quote industrial doors and gates
#[derive(Parser)]
#[command(name = "gatequote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List gate types and products
    Catalog(CatalogArgs),

    /// Manage customers
    Customer(CustomerArgs),

    /// Quote and manage gates
    Gate(GateArgs),

    /// Export, import and clear stored data
    Data(DataArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    // Logs go to stderr so --json output stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Customer(args) => commands::customer::run(args, &ctx).await,
        Commands::Gate(args) => commands::gate::run(args, &ctx).await,
        Commands::Data(args) => commands::data::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
