// lib/src/lib.rs

//! Core of the medications subgraph: configuration, prescription storage,
//! prescription rules and the federated GraphQL schema.

pub mod config;
pub mod database;
pub mod errors;
pub mod graphql;
pub mod prescriptions;
pub mod storage_engine;

pub use models::errors::{PrescriptionError, PrescriptionResult, ValidationError};
pub use models::{EntityReference, Prescription, PrescriptionId, PrescriptionStatus};

pub use crate::config::{load_service_config, ServiceConfig};
pub use crate::database::Database;
pub use crate::graphql::{build_schema, compose_schema, federation_sdl, MedicationsSchema, SchemaContract};
pub use crate::prescriptions::PrescriptionService;
pub use crate::storage_engine::{create_storage, PrescriptionStorageEngine, StorageConfig, StorageEngineType};
