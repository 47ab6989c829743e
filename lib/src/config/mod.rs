// lib/src/config/mod.rs

pub mod config_defaults;
pub mod config_helpers;
pub mod config_structs;

pub use config_defaults::*;
pub use config_helpers::{apply_env_overrides, load_service_config, load_service_config_from_yaml};
pub use config_structs::{SchemaConfig, ServerConfig, ServiceConfig, StorageConfig, StorageEngineType};
