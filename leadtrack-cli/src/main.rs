//! leadtrack CLI - sales-lead tracking API server
//!
//! Entry point for the `leadtrack` binary. Configuration comes from the
//! environment (a `.env` file is honored): `DATABASE_URL` selects the
//! storage backend by URL scheme, `JWT_SECRET` signs bearer tokens.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use leadtrack_core::AppConfig;
use leadtrack_server::{run_server, ServerOptions};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "leadtrack",
    author,
    version,
    about = "REST API server for sales-lead tracking"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind address (overrides LEADTRACK_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// Allow any CORS origin (development only)
    #[arg(long)]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config =
        AppConfig::from_env().context("loading configuration from the environment")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(addr = %config.bind_addr(), "starting leadtrack server");
    run_server(
        config,
        ServerOptions {
            cors_permissive: args.cors_permissive,
        },
    )
    .await
    .context("server exited with an error")
}
