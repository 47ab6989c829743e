// lib/src/config/config_structs.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::config_defaults::*;
pub use crate::storage_engine::{StorageConfig, StorageEngineType};

/// Top-level configuration of the medications subgraph, as read from
/// `medications_config.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl ServiceConfig {
    /// One-line description of the effective settings, for startup logs.
    pub fn summary(&self) -> String {
        format!(
            "listening on {}, {} storage at {}",
            self.server.bind_address(),
            self.storage.storage_engine_type,
            self.storage.data_directory.display()
        )
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve the GraphiQL page on `GET /graphql`.
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            graphiql: default_graphiql(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the schema contract document comes from. `None` uses the document
/// compiled into the binary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub contract_path: Option<PathBuf>,
}
