//! vitrine CLI - serves the titles, sales and player card catalogs over HTTP
//!
//! `vitrine serve` opens the PostgreSQL pool and exposes, per catalog,
//! `GET /<catalog>/todos` and `DELETE /<catalog>/remover`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "vitrine",
    author,
    version,
    about = "List/delete HTTP service for the titles, sales and player card catalogs"
)]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed arguments
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.vitrine)");
    } else {
        for path in &env_files {
            info!("Loaded configuration from {}", path.display());
        }
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
