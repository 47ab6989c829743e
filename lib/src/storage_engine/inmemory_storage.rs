// lib/src/storage_engine/inmemory_storage.rs
use super::storage_engine::PrescriptionStorageEngine;
use async_trait::async_trait;
use log::{debug, info};
use models::errors::PrescriptionResult;
use models::{Prescription, PrescriptionId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Volatile prescription store. Everything is lost when the process exits;
/// meant for tests and throwaway local runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    prescriptions: Arc<RwLock<HashMap<Uuid, Prescription>>>,
    running: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }

    pub async fn len(&self) -> usize {
        self.prescriptions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.prescriptions.read().await.is_empty()
    }
}

#[async_trait]
impl PrescriptionStorageEngine for InMemoryStorage {
    async fn start(&self) -> PrescriptionResult<()> {
        self.running.store(true, Ordering::SeqCst);
        info!("In-memory prescription storage started");
        Ok(())
    }

    async fn stop(&self) -> PrescriptionResult<()> {
        self.running.store(false, Ordering::SeqCst);
        info!("In-memory prescription storage stopped");
        Ok(())
    }

    fn get_type(&self) -> &'static str {
        "InMemory"
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn get_prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Option<Prescription>> {
        let prescriptions = self.prescriptions.read().await;
        Ok(prescriptions.get(id.as_uuid()).cloned())
    }

    async fn get_all_prescriptions(&self) -> PrescriptionResult<Vec<Prescription>> {
        let prescriptions = self.prescriptions.read().await;
        Ok(prescriptions.values().cloned().collect())
    }

    async fn save_prescription(&self, prescription: Prescription) -> PrescriptionResult<Prescription> {
        let mut prescriptions = self.prescriptions.write().await;
        debug!("Saving prescription {} in memory", prescription.id);
        prescriptions.insert(prescription.id.into(), prescription.clone());
        Ok(prescription)
    }

    async fn flush(&self) -> PrescriptionResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::NewPrescription;

    fn warfarin() -> Prescription {
        Prescription::create(NewPrescription {
            member_id: "11111111-1111-1111-1111-111111111111".parse().unwrap(),
            provider_id: "22222222-2222-2222-2222-222222222222".parse().unwrap(),
            medication_name: "Warfarin".to_string(),
            dosage: "5mg".to_string(),
            frequency: "daily".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end_date: None,
            pharmacy: Some("Corner Drug".to_string()),
            notes: None,
        })
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let storage = InMemoryStorage::new();
        assert!(storage.is_empty().await);

        let mut prescription = storage.save_prescription(warfarin()).await.unwrap();
        prescription.add_refills(1);
        storage.save_prescription(prescription.clone()).await.unwrap();

        assert_eq!(storage.len().await, 1);
        let stored = storage.get_prescription(&prescription.id).await.unwrap().unwrap();
        assert_eq!(stored.refills_remaining, 4);
    }

    #[tokio::test]
    async fn start_and_stop_toggle_running() {
        let storage = InMemoryStorage::new();
        assert!(!storage.is_running());
        storage.start().await.unwrap();
        assert!(storage.is_running());
        storage.stop().await.unwrap();
        assert!(!storage.is_running());
    }
}
