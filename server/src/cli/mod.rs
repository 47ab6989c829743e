// server/src/cli/mod.rs

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::start_cli;
pub use commands::{CliArgs, MedicationsCommand};
pub use handlers::{handle_check_schema, handle_print_schema, handle_serve};
