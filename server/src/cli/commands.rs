// server/src/cli/commands.rs

// Command-line arguments and subcommands of the medications server,
// defined with `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use medications::config::ServiceConfig;
use medications::StorageEngineType;

#[derive(Parser, Debug)]
#[command(name = "medications-server")]
#[command(version)]
#[command(about = "Medications GraphQL subgraph")]
pub struct CliArgs {
    /// Path of the YAML configuration file.
    #[arg(long, short = 'c', env = "MEDICATIONS_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
    /// `sled` or `inmemory`.
    #[arg(long)]
    pub storage_engine: Option<StorageEngineType>,
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,
    /// Schema contract document; defaults to the one built into the binary.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub schema_path: Option<PathBuf>,
    /// Log filter, e.g. `info` or `medications=debug`. Falls back to `RUST_LOG`.
    #[arg(long)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<MedicationsCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedicationsCommand {
    /// Serve the subgraph over HTTP (default)
    #[default]
    Serve,
    /// Print the federation SDL and exit
    PrintSchema,
    /// Check the executable schema against its contract and exit
    CheckSchema,
}

impl CliArgs {
    pub fn command(&self) -> MedicationsCommand {
        self.command.unwrap_or_default()
    }

    /// Applies flags on top of file and environment values.
    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(engine) = self.storage_engine {
            config.storage.storage_engine_type = engine;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_directory = dir.clone();
        }
        if let Some(path) = &self.schema_path {
            config.schema.contract_path = Some(path.clone());
        }
    }
}
