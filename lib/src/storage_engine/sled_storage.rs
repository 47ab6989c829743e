// lib/src/storage_engine/sled_storage.rs

use async_trait::async_trait;
use log::{debug, error, info};
use models::errors::{PrescriptionError, PrescriptionResult};
use models::{Prescription, PrescriptionId};
use sled::{Db, Tree};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};

use super::config::StorageConfig;
use super::storage_engine::PrescriptionStorageEngine;
use super::storage_utils::{deserialize_prescription, prescription_key, serialize_prescription};

const PRESCRIPTIONS_TREE: &str = "prescriptions";

/// Opens (creating if needed) the sled database under the configured data
/// directory.
pub fn open_sled_db(config: &StorageConfig) -> PrescriptionResult<Db> {
    let db_path = config.sled_path();
    if !db_path.exists() {
        info!("Creating database directory at {:?}", db_path);
        fs::create_dir_all(&db_path).map_err(|e| {
            error!("Failed to create database directory at {:?}: {}", db_path, e);
            PrescriptionError::StorageError(format!(
                "Failed to create database directory at {:?}: {}",
                db_path, e
            ))
        })?;
    } else if !db_path.is_dir() {
        error!("Path {:?} exists but is not a directory", db_path);
        return Err(PrescriptionError::StorageError(format!(
            "Path {:?} is not a directory",
            db_path
        )));
    }

    info!("Opening Sled database at {:?}", db_path);
    sled::Config::new()
        .path(&db_path)
        .use_compression(config.use_compression)
        .cache_capacity(config.cache_capacity)
        .open()
        .map_err(|e| {
            error!("Failed to open Sled database at {:?}: {}", db_path, e);
            PrescriptionError::StorageError(format!(
                "Failed to open Sled database at {:?}: {}. Ensure the directory is accessible.",
                db_path, e
            ))
        })
}

/// Prescription store persisted in a single sled tree, keyed by the raw
/// prescription UUID.
#[derive(Debug)]
pub struct SledStorage {
    db: Db,
    tree: Tree,
    running: AtomicBool,
}

impl SledStorage {
    pub fn new(db: Db) -> PrescriptionResult<Self> {
        let tree = db.open_tree(PRESCRIPTIONS_TREE)?;
        Ok(SledStorage {
            db,
            tree,
            running: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl PrescriptionStorageEngine for SledStorage {
    async fn start(&self) -> PrescriptionResult<()> {
        self.running.store(true, Ordering::SeqCst);
        info!("Sled prescription storage started with {} records", self.tree.len());
        Ok(())
    }

    async fn stop(&self) -> PrescriptionResult<()> {
        self.flush().await?;
        self.running.store(false, Ordering::SeqCst);
        info!("Sled prescription storage stopped");
        Ok(())
    }

    fn get_type(&self) -> &'static str {
        "Sled"
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn get_prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Option<Prescription>> {
        match self.tree.get(prescription_key(id))? {
            Some(bytes) => Ok(Some(deserialize_prescription(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all_prescriptions(&self) -> PrescriptionResult<Vec<Prescription>> {
        let mut prescriptions = Vec::with_capacity(self.tree.len());
        for entry in self.tree.iter() {
            let (_key, value) = entry?;
            prescriptions.push(deserialize_prescription(&value)?);
        }
        Ok(prescriptions)
    }

    async fn save_prescription(&self, prescription: Prescription) -> PrescriptionResult<Prescription> {
        let bytes = serialize_prescription(&prescription)?;
        self.tree.insert(prescription_key(&prescription.id), bytes)?;
        debug!("Saved prescription {} to sled", prescription.id);
        Ok(prescription)
    }

    async fn flush(&self) -> PrescriptionResult<()> {
        let flushed = self.db.flush_async().await?;
        debug!("Flushed {} bytes to sled", flushed);
        Ok(())
    }
}
