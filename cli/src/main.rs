//! Shelf - command-line access to local collections.

use clap::Parser;
use shelf_cli::{error::EXIT_REFUSED, execute, open_store, Cli, CliError, Config};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_cli=info,shelf_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", e.to_json());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<u8, CliError> {
    let config = cli.config(Config::from_env()?)?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        entity = %config.entity,
        "opening collection"
    );

    let mut store = open_store(&config)?;
    let response = execute(&mut store, &cli.command)?;
    println!("{}", response.to_json());

    Ok(if response.is_error() { EXIT_REFUSED as u8 } else { 0 })
}
