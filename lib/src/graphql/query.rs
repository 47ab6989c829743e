// lib/src/graphql/query.rs

use async_graphql::{Context, Object, Result, ID};
use models::{MemberId, PrescriptionId, ProviderId};

use crate::errors::IntoGraphQLResult;
use crate::graphql::types::{parse_id, PrescriptionObject, PrescriptionStatusValue};
use crate::prescriptions::PrescriptionService;

fn objects(prescriptions: Vec<models::Prescription>) -> Vec<PrescriptionObject> {
    prescriptions.into_iter().map(PrescriptionObject::from).collect()
}

#[derive(Debug, Clone, Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn prescriptions(&self, ctx: &Context<'_>) -> Result<Vec<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        service.prescriptions().await.map(objects).into_graphql()
    }

    /// Null when no prescription has the given id.
    async fn prescription(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        let id = parse_id::<PrescriptionId>(&id).into_graphql()?;
        service
            .prescription(&id)
            .await
            .map(|found| found.map(PrescriptionObject::from))
            .into_graphql()
    }

    async fn prescriptions_by_member(
        &self,
        ctx: &Context<'_>,
        member_id: ID,
    ) -> Result<Vec<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        let member_id = parse_id::<MemberId>(&member_id).into_graphql()?;
        service.prescriptions_by_member(&member_id).await.map(objects).into_graphql()
    }

    async fn prescriptions_by_provider(
        &self,
        ctx: &Context<'_>,
        provider_id: ID,
    ) -> Result<Vec<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        let provider_id = parse_id::<ProviderId>(&provider_id).into_graphql()?;
        service.prescriptions_by_provider(&provider_id).await.map(objects).into_graphql()
    }

    async fn prescriptions_by_status(
        &self,
        ctx: &Context<'_>,
        status: PrescriptionStatusValue,
    ) -> Result<Vec<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        service.prescriptions_by_status(status.into()).await.map(objects).into_graphql()
    }

    /// Entity resolver for `Prescription` representations sent by the router.
    #[graphql(entity)]
    async fn find_prescription_by_id(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<PrescriptionObject>> {
        let service = ctx.data::<PrescriptionService>()?;
        let id = parse_id::<PrescriptionId>(&id).into_graphql()?;
        service
            .prescription(&id)
            .await
            .map(|found| found.map(PrescriptionObject::from))
            .into_graphql()
    }
}
