// models/src/lib.rs

//! Domain types for the medications subgraph: the `Prescription` entity,
//! its status, the identifiers crossing the API boundary, and the reference
//! stubs handed to the federation gateway for entities owned elsewhere.

pub mod errors;
pub mod identifiers;
pub mod medical;
pub mod references;

pub use errors::{PrescriptionError, PrescriptionResult, ValidationError, ValidationResult};
pub use identifiers::{MemberId, PrescriptionId, ProviderId};
pub use medical::{NewPrescription, Prescription, PrescriptionStatus, DEFAULT_REFILLS};
pub use references::EntityReference;
