// models/src/identifiers.rs

use core::hash::Hash;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ValidationError, ValidationResult};

/// Declares a UUID-backed identifier newtype that parses strictly at the API
/// boundary and prints in the canonical hyphenated lowercase form.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Human-readable name of the identifier, used in error messages.
            pub const KIND: &'static str = $kind;

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> ValidationResult<Self> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidIdentifier {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a prescription. Generated by this service on create and
    /// never reassigned.
    PrescriptionId,
    "prescription"
);

uuid_identifier!(
    /// Identifier of a member owned by another subgraph. Opaque here.
    MemberId,
    "member"
);

uuid_identifier!(
    /// Identifier of a provider owned by another subgraph. Opaque here.
    ProviderId,
    "provider"
);

impl PrescriptionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrescriptionId {
    fn default() -> Self {
        Self::new()
    }
}
