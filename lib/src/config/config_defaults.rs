// lib/src/config/config_defaults.rs

use std::path::PathBuf;

use crate::storage_engine::StorageEngineType;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3005;
pub const DEFAULT_DATA_DIRECTORY: &str = "./data/medications";
pub const DEFAULT_CONFIG_PATH: &str = "server/medications_config.yaml";
pub const DEFAULT_CACHE_CAPACITY: u64 = 64 * 1024 * 1024;

pub const ENV_HOST: &str = "MEDICATIONS_HOST";
pub const ENV_PORT: &str = "MEDICATIONS_PORT";
pub const ENV_GRAPHIQL: &str = "MEDICATIONS_GRAPHIQL";
pub const ENV_STORAGE_ENGINE: &str = "MEDICATIONS_STORAGE_ENGINE";
pub const ENV_DATA_DIRECTORY: &str = "MEDICATIONS_DATA_DIRECTORY";
pub const ENV_SCHEMA_PATH: &str = "MEDICATIONS_SCHEMA_PATH";

pub fn default_host() -> String { DEFAULT_HOST.to_string() }
pub fn default_port() -> u16 { DEFAULT_PORT }
pub fn default_graphiql() -> bool { true }
pub fn default_storage_engine_type() -> StorageEngineType { StorageEngineType::Sled }
pub fn default_data_directory() -> PathBuf { PathBuf::from(DEFAULT_DATA_DIRECTORY) }
// sled's compression needs its "compression" feature, which is not enabled.
pub fn default_use_compression() -> bool { false }
pub fn default_cache_capacity() -> u64 { DEFAULT_CACHE_CAPACITY }
pub fn default_config_path() -> PathBuf { PathBuf::from(DEFAULT_CONFIG_PATH) }
