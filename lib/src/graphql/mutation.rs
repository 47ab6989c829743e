// lib/src/graphql/mutation.rs

use async_graphql::{Context, Object, Result, ID};
use models::{NewPrescription, PrescriptionId};

use crate::errors::IntoGraphQLResult;
use crate::graphql::types::{
    parse_id, CreatePrescriptionInput, PrescriptionObject, RefillPrescriptionInput,
};
use crate::prescriptions::PrescriptionService;

#[derive(Debug, Clone, Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Creates an `ACTIVE` prescription with the default refill count.
    async fn create_prescription(
        &self,
        ctx: &Context<'_>,
        input: CreatePrescriptionInput,
    ) -> Result<PrescriptionObject> {
        let service = ctx.data::<PrescriptionService>()?;
        let new = NewPrescription::try_from(input).into_graphql()?;
        service.create_prescription(new).await.map(PrescriptionObject::from).into_graphql()
    }

    async fn cancel_prescription(&self, ctx: &Context<'_>, id: ID) -> Result<PrescriptionObject> {
        let service = ctx.data::<PrescriptionService>()?;
        let id = parse_id::<PrescriptionId>(&id).into_graphql()?;
        service.cancel_prescription(&id).await.map(PrescriptionObject::from).into_graphql()
    }

    async fn refill_prescription(
        &self,
        ctx: &Context<'_>,
        input: RefillPrescriptionInput,
    ) -> Result<PrescriptionObject> {
        let service = ctx.data::<PrescriptionService>()?;
        let id = parse_id::<PrescriptionId>(&input.prescription_id).into_graphql()?;
        service
            .refill_prescription(&id, input.additional_refills)
            .await
            .map(PrescriptionObject::from)
            .into_graphql()
    }

    /// Marks the prescription `COMPLETED` and drops its remaining refills to 0.
    async fn complete_prescription(&self, ctx: &Context<'_>, id: ID) -> Result<PrescriptionObject> {
        let service = ctx.data::<PrescriptionService>()?;
        let id = parse_id::<PrescriptionId>(&id).into_graphql()?;
        service.complete_prescription(&id).await.map(PrescriptionObject::from).into_graphql()
    }
}
