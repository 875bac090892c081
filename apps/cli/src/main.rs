use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
mod config;
mod setup;

use commands::{GenerateArgs, ValidateArgs};
use config::AppConfig;

/// Generate or validate cross-domain authentication tokens for testing.
#[derive(Parser, Debug)]
#[command(name = "xdauth", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a signed token
    Generate(GenerateArgs),

    /// Validate a token and print its claims
    Validate(ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    setup::init_tracing(cli.verbose);

    let config = AppConfig::from_env();
    tracing::debug!(
        enabled = config.token.enabled,
        key_var = %config.key_var,
        "Loaded configuration"
    );

    match cli.command {
        Command::Generate(args) => commands::generate(&config, args),
        Command::Validate(args) => commands::validate(&config, args),
    }
}
