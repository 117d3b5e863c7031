//! The chain of influence: nodes joined by a displayed relation category.

use std::collections::BTreeSet;

use caseprov_rdf::Node;
use tracing::debug;

use crate::classify::Classification;
use crate::edges::EdgeTable;
use crate::options::IncludeCategories;
use crate::select::Closure;

/// Edge endpoints plus every member of an included class, so unconnected
/// nodes of a requested category still show. Unrestricted when no category
/// was requested.
pub fn influence_chain(
    edges: &EdgeTable,
    include: &IncludeCategories,
    classification: &Classification,
) -> Closure {
    if !include.any() {
        return Closure::Unrestricted;
    }
    let mut chain: BTreeSet<Node> = edges.endpoints();
    if include.activity_informing {
        chain.extend(classification.activities.iter().cloned());
    }
    if include.agent_delegating {
        chain.extend(classification.agents.iter().cloned());
    }
    if include.entity_deriving {
        chain.extend(classification.entities.iter().cloned());
    }
    debug!(count = chain.len(), "chain of influence");
    Closure::Restricted(chain)
}
