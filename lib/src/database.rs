// lib/src/database.rs

use std::fmt;
use std::sync::Arc;

use log::debug;
use models::errors::{PrescriptionError, PrescriptionResult};
use models::{MemberId, Prescription, PrescriptionId, PrescriptionStatus, ProviderId};

use crate::storage_engine::{create_storage, PrescriptionStorageEngine, StorageConfig};

/// Data access layer for prescriptions.
///
/// This struct owns the storage engine instance and exposes the lookups the
/// resolvers need. Reads return records in the engine's natural order; there
/// is no pagination or sorting.
pub struct Database {
    storage_engine: Arc<dyn PrescriptionStorageEngine>,
}

impl Database {
    /// Creates a new database instance based on the provided storage configuration.
    ///
    /// This function initializes and starts the chosen storage engine (Sled or In-Memory).
    pub async fn new(config: &StorageConfig) -> PrescriptionResult<Self> {
        let storage_engine = create_storage(config)?;
        Self::with_engine(storage_engine).await
    }

    /// Wraps an already constructed engine, starting it.
    pub async fn with_engine(storage_engine: Arc<dyn PrescriptionStorageEngine>) -> PrescriptionResult<Self> {
        storage_engine.start().await?;
        Ok(Database { storage_engine })
    }

    pub fn engine_type(&self) -> &'static str {
        self.storage_engine.get_type()
    }

    pub fn is_running(&self) -> bool {
        self.storage_engine.is_running()
    }

    pub async fn stop(&self) -> PrescriptionResult<()> {
        self.storage_engine.stop().await
    }

    pub async fn find_all(&self) -> PrescriptionResult<Vec<Prescription>> {
        self.storage_engine.get_all_prescriptions().await
    }

    /// Looks up a prescription; `None` is the explicit absence signal.
    pub async fn find_by_id(&self, id: &PrescriptionId) -> PrescriptionResult<Option<Prescription>> {
        debug!("Looking up prescription {}", id);
        self.storage_engine.get_prescription(id).await
    }

    /// Like [`Database::find_by_id`], but absence is a `NotFound` error.
    pub async fn get_by_id(&self, id: &PrescriptionId) -> PrescriptionResult<Prescription> {
        self.find_by_id(id)
            .await?
            .ok_or(PrescriptionError::NotFound(*id))
    }

    pub async fn find_by_member(&self, member_id: &MemberId) -> PrescriptionResult<Vec<Prescription>> {
        self.storage_engine.get_prescriptions_by_member(member_id).await
    }

    pub async fn find_by_provider(&self, provider_id: &ProviderId) -> PrescriptionResult<Vec<Prescription>> {
        self.storage_engine.get_prescriptions_by_provider(provider_id).await
    }

    pub async fn find_by_status(&self, status: PrescriptionStatus) -> PrescriptionResult<Vec<Prescription>> {
        self.storage_engine.get_prescriptions_by_status(status).await
    }

    /// Insert-or-update keyed by the prescription identifier.
    pub async fn save(&self, prescription: Prescription) -> PrescriptionResult<Prescription> {
        self.storage_engine.save_prescription(prescription).await
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("storage_engine", &self.storage_engine.get_type())
            .finish()
    }
}
