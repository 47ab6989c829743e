// lib/src/storage_engine/config.rs

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use models::errors::PrescriptionError;

use crate::config::config_defaults::{
    default_cache_capacity, default_data_directory, default_storage_engine_type,
    default_use_compression,
};

/// Enum for the storage engines a prescription store can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEngineType {
    Sled,
    InMemory,
}

impl StorageEngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageEngineType::Sled => "sled",
            StorageEngineType::InMemory => "inmemory",
        }
    }
}

impl FromStr for StorageEngineType {
    type Err = PrescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sled" => Ok(StorageEngineType::Sled),
            "inmemory" | "in-memory" | "memory" => Ok(StorageEngineType::InMemory),
            _ => Err(PrescriptionError::ConfigError(format!(
                "Unknown storage engine type: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for StorageEngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Engine names travel through YAML as plain strings.
impl Serialize for StorageEngineType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StorageEngineType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StorageEngineType::from_str(&raw).map_err(de::Error::custom)
    }
}

/// Storage section of the service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_engine_type")]
    pub storage_engine_type: StorageEngineType,
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
    #[serde(default = "default_use_compression")]
    pub use_compression: bool,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            storage_engine_type: default_storage_engine_type(),
            data_directory: default_data_directory(),
            use_compression: default_use_compression(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        StorageConfig {
            storage_engine_type: StorageEngineType::InMemory,
            ..StorageConfig::default()
        }
    }

    /// Directory the sled engine opens its database in.
    pub fn sled_path(&self) -> PathBuf {
        self.data_directory.join("sled")
    }
}
