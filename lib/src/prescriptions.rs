// lib/src/prescriptions.rs

//! Prescription operations behind the GraphQL resolvers.
//!
//! Reads hand absence back as `None`; writes against an unknown identifier
//! fail with `PrescriptionError::NotFound`. Writes are a single
//! read-modify-save with last-write-wins semantics and no status transition
//! checks.

use std::sync::Arc;

use log::{debug, info};
use models::errors::PrescriptionResult;
use models::{
    MemberId, NewPrescription, Prescription, PrescriptionId, PrescriptionStatus, ProviderId,
};

use crate::database::Database;

#[derive(Clone, Debug)]
pub struct PrescriptionService {
    database: Arc<Database>,
}

impl PrescriptionService {
    pub fn new(database: Arc<Database>) -> Self {
        PrescriptionService { database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn prescriptions(&self) -> PrescriptionResult<Vec<Prescription>> {
        debug!("Fetching all prescriptions");
        self.database.find_all().await
    }

    pub async fn prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Option<Prescription>> {
        self.database.find_by_id(id).await
    }

    pub async fn prescriptions_by_member(&self, member_id: &MemberId) -> PrescriptionResult<Vec<Prescription>> {
        debug!("Fetching prescriptions for member {}", member_id);
        self.database.find_by_member(member_id).await
    }

    pub async fn prescriptions_by_provider(&self, provider_id: &ProviderId) -> PrescriptionResult<Vec<Prescription>> {
        debug!("Fetching prescriptions for provider {}", provider_id);
        self.database.find_by_provider(provider_id).await
    }

    pub async fn prescriptions_by_status(&self, status: PrescriptionStatus) -> PrescriptionResult<Vec<Prescription>> {
        debug!("Fetching {} prescriptions", status);
        self.database.find_by_status(status).await
    }

    pub async fn create_prescription(&self, new: NewPrescription) -> PrescriptionResult<Prescription> {
        let prescription = self.database.save(Prescription::create(new)).await?;
        info!(
            "Created prescription {} ({}) for member {}",
            prescription.id, prescription.medication_name, prescription.member_id
        );
        Ok(prescription)
    }

    pub async fn cancel_prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Prescription> {
        let prescription = self.update(id, Prescription::cancel).await?;
        info!("Cancelled prescription {}", id);
        Ok(prescription)
    }

    /// Adds `additional_refills` to the remaining count. No bound or sign
    /// check is applied.
    pub async fn refill_prescription(&self, id: &PrescriptionId, additional_refills: i32) -> PrescriptionResult<Prescription> {
        let prescription = self.update(id, |p| p.add_refills(additional_refills)).await?;
        info!(
            "Refilled prescription {} by {}, {} remaining",
            id, additional_refills, prescription.refills_remaining
        );
        Ok(prescription)
    }

    pub async fn complete_prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Prescription> {
        let prescription = self.update(id, Prescription::complete).await?;
        info!("Completed prescription {}", id);
        Ok(prescription)
    }

    async fn update<F>(&self, id: &PrescriptionId, apply: F) -> PrescriptionResult<Prescription>
    where
        F: FnOnce(&mut Prescription),
    {
        let mut prescription = self.database.get_by_id(id).await?;
        apply(&mut prescription);
        self.database.save(prescription).await
    }
}
