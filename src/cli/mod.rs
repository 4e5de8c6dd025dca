pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "hubctl")]
#[command(about = "hubctl - operator tooling for the ServiceHub API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a session token signed with the configured JWT secret")]
    Token(commands::token::TokenArgs),

    #[command(about = "Call POST /api/admin/setup on a running server")]
    SetupAdmin(commands::admin::SetupAdminArgs),

    #[command(about = "Print the Postgres schema")]
    Schema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token(args) => commands::token::handle(args, output_format),
        Commands::SetupAdmin(args) => commands::admin::handle(args, output_format).await,
        Commands::Schema => commands::schema::handle(),
    }
}
