//! panelbridge CLI entry point

use clap::Parser;
use panelbridge_cli::{
    cli::{Cli, Commands},
    commands::{DebugCommand, TestCommand},
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Test { connection } => TestCommand::run(connection.resolve()?).await,
        Commands::Debug { connection } => DebugCommand::run(connection.resolve()?).await,
    }
}
