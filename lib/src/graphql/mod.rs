// lib/src/graphql/mod.rs

//! The federated GraphQL schema of the medications subgraph.

pub mod contract;
pub mod federation;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, SDLExportOptions, Schema};
use log::info;

use crate::prescriptions::PrescriptionService;

pub use contract::{ContractError, SchemaContract};
pub use federation::{Member, Provider};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{CreatePrescriptionInput, PrescriptionObject, PrescriptionStatusValue, RefillPrescriptionInput};

pub type MedicationsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the executable schema with federation support (`_service` and
/// `_entities`) and the prescription service attached as context data.
pub fn build_schema(service: PrescriptionService) -> MedicationsSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .enable_federation()
        .data(service)
        .finish()
}

/// Builds the schema and checks it against `contract`. Run once at startup;
/// the returned schema is handed unchanged to the HTTP layer.
pub async fn compose_schema(
    service: PrescriptionService,
    contract: &SchemaContract,
) -> Result<MedicationsSchema, ContractError> {
    let schema = build_schema(service);
    contract.verify(&schema).await?;
    info!("Composed medications schema");
    Ok(schema)
}

/// SDL with federation directives, as returned by `_service { sdl }`.
pub fn federation_sdl(schema: &MedicationsSchema) -> String {
    schema.sdl_with_options(SDLExportOptions::new().federation())
}
