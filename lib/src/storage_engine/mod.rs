// lib/src/storage_engine/mod.rs

// Module declarations
pub mod config;
pub mod inmemory_storage;
pub mod sled_storage;
pub mod storage_engine;
pub mod storage_utils;

// Re-export key types and traits for external use
pub use config::{StorageConfig, StorageEngineType};
pub use inmemory_storage::InMemoryStorage;
pub use sled_storage::{open_sled_db, SledStorage};
pub use storage_engine::PrescriptionStorageEngine;

#[cfg(test)]
pub use storage_engine::MockPrescriptionStorageEngine;

use log::info;
use models::errors::PrescriptionResult;
use std::sync::Arc;

/// Creates a storage engine instance based on the provided configuration.
///
/// The engine is returned unstarted; `Database::new` starts it.
pub fn create_storage(config: &StorageConfig) -> PrescriptionResult<Arc<dyn PrescriptionStorageEngine>> {
    info!("Creating {} prescription storage", config.storage_engine_type);
    match config.storage_engine_type {
        StorageEngineType::Sled => {
            let db = open_sled_db(config)?;
            Ok(Arc::new(SledStorage::new(db)?))
        }
        StorageEngineType::InMemory => Ok(Arc::new(InMemoryStorage::new())),
    }
}
