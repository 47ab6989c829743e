// server/src/cli/cli.rs

// CLI entry point of the medications server.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use medications::config::load_service_config;

use crate::cli::commands::{CliArgs, MedicationsCommand};
use crate::cli::handlers::{handle_check_schema, handle_print_schema, handle_serve};

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level.as_deref());

    let mut config = load_service_config(args.config.as_deref())
        .context("Failed to load medications configuration")?;
    args.apply_overrides(&mut config);
    info!("Configuration resolved: {}", config.summary());

    match args.command() {
        MedicationsCommand::Serve => {
            info!("Starting medications subgraph on {}", config.server.bind_address());
            handle_serve(config).await
        }
        MedicationsCommand::PrintSchema => {
            println!("{}", handle_print_schema().await?);
            Ok(())
        }
        MedicationsCommand::CheckSchema => {
            handle_check_schema(&config).await?;
            println!("Schema matches its contract.");
            Ok(())
        }
    }
}

/// `--log-level` wins over `RUST_LOG`; without either, `info` is used.
fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    let _ = builder.try_init();
}
