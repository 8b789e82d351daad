pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cotiza",
    about = "Cotiza operator CLI",
    long_about = "Quote against the configured inventory, list it, inspect configuration and run readiness checks.",
    after_help = "Examples:\n  cotiza quote --mensaje \"5 cemento y 2 varilla\"\n  cotiza quote --item cemento:5 --item varilla\n  cotiza catalog\n  cotiza doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve a quote from a free-text message or an explicit item list")]
    Quote {
        #[arg(long, help = "Free-text request, e.g. \"5 cemento y 2 varilla\"")]
        mensaje: Option<String>,
        #[arg(
            long = "item",
            value_name = "NAME[:QTY]",
            help = "Structured item; repeatable. Takes precedence over --mensaje"
        )]
        items: Vec<String>,
        #[arg(long, help = "Inventory JSON file (overrides configuration)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Print the inventory listing in catalog order")]
    Catalog {
        #[arg(long, help = "Inventory JSON file (overrides configuration)")]
        catalog: Option<PathBuf>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate configuration and inventory readability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Quote { mensaje, items, catalog } => {
            commands::quote::run(mensaje.as_deref(), &items, catalog)
        }
        Command::Catalog { catalog } => commands::catalog::run(catalog),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
