// lib/src/errors.rs

//! Mapping of domain failures onto GraphQL errors.
//!
//! Every error leaving a resolver carries an `extensions.code` so that the
//! gateway and clients can tell caller mistakes from service faults.

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use log::error;
use models::errors::{PrescriptionError, PrescriptionResult, ValidationError};

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

pub fn error_code(err: &PrescriptionError) -> &'static str {
    match err {
        PrescriptionError::NotFound(_) => NOT_FOUND,
        PrescriptionError::Validation(_) => BAD_USER_INPUT,
        _ => INTERNAL_SERVER_ERROR,
    }
}

pub fn to_graphql_error(err: PrescriptionError) -> GraphQLError {
    let code = error_code(&err);
    if code == INTERNAL_SERVER_ERROR {
        error!("Resolver failed: {}", err);
    }
    GraphQLError::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

pub fn validation_error(err: ValidationError) -> GraphQLError {
    to_graphql_error(PrescriptionError::Validation(err))
}

/// Converts service results into resolver results.
pub trait IntoGraphQLResult<T> {
    fn into_graphql(self) -> async_graphql::Result<T>;
}

impl<T> IntoGraphQLResult<T> for PrescriptionResult<T> {
    fn into_graphql(self) -> async_graphql::Result<T> {
        self.map_err(to_graphql_error)
    }
}

impl<T> IntoGraphQLResult<T> for Result<T, ValidationError> {
    fn into_graphql(self) -> async_graphql::Result<T> {
        self.map_err(validation_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;
    use models::PrescriptionId;

    fn code_of(err: &GraphQLError) -> Option<Value> {
        err.extensions.as_ref().and_then(|ext| ext.get("code").cloned())
    }

    #[test]
    fn not_found_keeps_message_and_code() {
        let id = PrescriptionId::new();
        let err = to_graphql_error(PrescriptionError::NotFound(id));
        assert_eq!(err.message, format!("Prescription with ID {} not found", id));
        assert_eq!(code_of(&err), Some(Value::from(NOT_FOUND)));
    }

    #[test]
    fn validation_maps_to_bad_user_input() {
        let result: Result<(), ValidationError> = Err(ValidationError::InvalidIdentifier {
            kind: "prescription",
            value: "abc".to_string(),
        });
        let err = result.into_graphql().unwrap_err();
        assert_eq!(code_of(&err), Some(Value::from(BAD_USER_INPUT)));
    }

    #[test]
    fn storage_faults_are_internal() {
        let err = PrescriptionError::StorageError("tree poisoned".to_string());
        assert_eq!(error_code(&err), INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(&PrescriptionError::InternalError("x".into())), INTERNAL_SERVER_ERROR);
    }
}
