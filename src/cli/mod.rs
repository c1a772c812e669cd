pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "landing_api_rust=info,tower_http=info";

#[derive(Parser)]
#[command(name = "landing")]
#[command(about = "Landing API - server and maintenance commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Create the default tenant, its admin and the initial landing content")]
    Seed(commands::seed::SeedArgs),

    #[command(about = "Print a scrypt hash suitable for ADMIN_PASSWORD_HASH")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Install the global `tracing` subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle().await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Seed(args) => commands::seed::handle(args, output_format).await,
        Commands::HashPassword { password } => commands::hash_password::handle(&password, output_format),
    }
}
