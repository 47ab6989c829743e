// lib/src/graphql/federation.rs

//! Stubs for entities owned by other subgraphs.
//!
//! They carry the key and nothing else; the router resolves the rest from
//! the owning subgraph.

use async_graphql::{SimpleObject, ID};
use models::EntityReference;

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(unresolvable = "id")]
pub struct Member {
    pub id: ID,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(unresolvable = "id")]
pub struct Provider {
    pub id: ID,
}

impl From<EntityReference> for Member {
    fn from(reference: EntityReference) -> Self {
        Member { id: ID(reference.id) }
    }
}

impl From<EntityReference> for Provider {
    fn from(reference: EntityReference) -> Self {
        Provider { id: ID(reference.id) }
    }
}
