// models/src/references.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::identifiers::{MemberId, ProviderId};

/// A federation entity reference stub: the minimal `{__typename, id}` payload
/// returned in place of an entity owned by another subgraph. The gateway uses
/// it to fetch the full entity from its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
}

impl EntityReference {
    pub const MEMBER_TYPENAME: &'static str = "Member";
    pub const PROVIDER_TYPENAME: &'static str = "Provider";

    pub fn new(typename: impl Into<String>, id: impl ToString) -> Self {
        EntityReference {
            typename: typename.into(),
            id: id.to_string(),
        }
    }

    pub fn member(id: &MemberId) -> Self {
        Self::new(Self::MEMBER_TYPENAME, id)
    }

    pub fn provider(id: &ProviderId) -> Self {
        Self::new(Self::PROVIDER_TYPENAME, id)
    }

    /// The wire form of the stub, exactly `__typename` and `id`.
    pub fn to_json(&self) -> Value {
        json!({
            "__typename": self.typename,
            "id": self.id,
        })
    }
}
