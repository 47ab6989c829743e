// models/src/errors.rs

use std::io;
pub use thiserror::Error;

use crate::identifiers::PrescriptionId;

#[derive(Debug, Error)]
pub enum PrescriptionError {
    #[error("Prescription with ID {0} not found")]
    NotFound(PrescriptionId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    StorageError(String), // General storage operation error
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("An internal error occurred: {0}")]
    InternalError(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
    #[cfg(feature = "bincode-errors")]
    #[error(transparent)]
    BincodeDecode(#[from] bincode::error::DecodeError),
    #[cfg(feature = "bincode-errors")]
    #[error(transparent)]
    BincodeEncode(#[from] bincode::error::EncodeError),
}

impl PrescriptionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PrescriptionError::NotFound(_))
    }

    /// True when the caller supplied something malformed, as opposed to a
    /// failure inside the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, PrescriptionError::Validation(_))
    }
}

/// Rejections raised while converting boundary values (identifiers, dates,
/// enum names) into domain values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {kind} identifier '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },
    #[error("invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("invalid prescription status '{0}'")]
    InvalidStatus(String),
}

pub type PrescriptionResult<T> = Result<T, PrescriptionError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
