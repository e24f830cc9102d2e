//! Saree Cart CLI - Session store management.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table used by the storefront
//! saree-cli migrate
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the `PostgreSQL` session schema and table

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "saree-cli")]
#[command(author, version, about = "Saree Cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session store table in `PostgreSQL`
    Migrate {
        /// Database URL (defaults to `STOREFRONT_DATABASE_URL`, then `DATABASE_URL`)
        #[arg(long)]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { database_url } => commands::migrate::sessions(database_url).await,
    }
}
