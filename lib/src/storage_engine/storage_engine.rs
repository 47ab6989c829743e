// lib/src/storage_engine/storage_engine.rs

use async_trait::async_trait;
use models::errors::PrescriptionResult;
use models::{MemberId, Prescription, PrescriptionId, PrescriptionStatus, ProviderId};

/// Identifier-keyed repository of prescriptions. Engines only have to provide
/// point reads, full scans and upserts; the filtered scans default to a full
/// scan in natural storage order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionStorageEngine: Send + Sync + 'static {
    async fn start(&self) -> PrescriptionResult<()>;
    async fn stop(&self) -> PrescriptionResult<()>;
    fn get_type(&self) -> &'static str;
    fn is_running(&self) -> bool;

    async fn get_prescription(&self, id: &PrescriptionId) -> PrescriptionResult<Option<Prescription>>;
    async fn get_all_prescriptions(&self) -> PrescriptionResult<Vec<Prescription>>;

    /// Inserts or replaces the record stored under `prescription.id`.
    async fn save_prescription(&self, prescription: Prescription) -> PrescriptionResult<Prescription>;
    async fn flush(&self) -> PrescriptionResult<()>;

    async fn get_prescriptions_by_member(&self, member_id: &MemberId) -> PrescriptionResult<Vec<Prescription>> {
        let all = self.get_all_prescriptions().await?;
        Ok(all.into_iter().filter(|p| p.member_id == *member_id).collect())
    }

    async fn get_prescriptions_by_provider(&self, provider_id: &ProviderId) -> PrescriptionResult<Vec<Prescription>> {
        let all = self.get_all_prescriptions().await?;
        Ok(all.into_iter().filter(|p| p.provider_id == *provider_id).collect())
    }

    async fn get_prescriptions_by_status(&self, status: PrescriptionStatus) -> PrescriptionResult<Vec<Prescription>> {
        let all = self.get_all_prescriptions().await?;
        Ok(all.into_iter().filter(|p| p.status == status).collect())
    }
}
