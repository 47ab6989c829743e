// server/src/main.rs

// Entry point of the medications subgraph server.

use anyhow::Result;
use medications_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    start_cli().await
}
