//! PROV class membership of every node, via `rdf:type/rdfs:subClassOf*`.

use std::collections::BTreeSet;

use caseprov_rdf::vocab::{prov, rdfs};
use caseprov_rdf::{parse_select_query, Bindings, Graph, Node, ProvGraph};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::rows::node_column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProvClass {
    Activity,
    Agent,
    Entity,
    Collection,
}

impl ProvClass {
    pub const ALL: [ProvClass; 4] = [
        ProvClass::Activity,
        ProvClass::Agent,
        ProvClass::Entity,
        ProvClass::Collection,
    ];

    pub fn iri(self) -> &'static str {
        match self {
            ProvClass::Activity => prov::ACTIVITY,
            ProvClass::Agent => prov::AGENT,
            ProvClass::Entity => prov::ENTITY,
            ProvClass::Collection => prov::COLLECTION,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub activities: BTreeSet<Node>,
    pub agents: BTreeSet<Node>,
    pub entities: BTreeSet<Node>,
    pub collections: BTreeSet<Node>,
}

impl Classification {
    pub fn members(&self, class: ProvClass) -> &BTreeSet<Node> {
        match class {
            ProvClass::Activity => &self.activities,
            ProvClass::Agent => &self.agents,
            ProvClass::Entity => &self.entities,
            ProvClass::Collection => &self.collections,
        }
    }

    fn members_mut(&mut self, class: ProvClass) -> &mut BTreeSet<Node> {
        match class {
            ProvClass::Activity => &mut self.activities,
            ProvClass::Agent => &mut self.agents,
            ProvClass::Entity => &mut self.entities,
            ProvClass::Collection => &mut self.collections,
        }
    }

    pub fn classes_of(&self, node: &Node) -> BTreeSet<ProvClass> {
        ProvClass::ALL
            .into_iter()
            .filter(|class| self.members(*class).contains(node))
            .collect()
    }

    /// Activities ∪ Agents ∪ Entities. Collections are Entities here.
    pub fn universe(&self) -> BTreeSet<Node> {
        self.activities
            .iter()
            .chain(&self.agents)
            .chain(&self.entities)
            .cloned()
            .collect()
    }
}

/// The empty collection singleton.
pub fn empty_collection() -> Node {
    Node::iri(prov::EMPTY_COLLECTION)
}

/// Add the PROV-O subclass axioms the classification queries rely on.
pub fn add_prov_axioms(graph: &mut Graph) {
    for (sub, sup) in [
        (prov::COLLECTION, prov::ENTITY),
        (prov::PERSON, prov::AGENT),
        (prov::SOFTWARE_AGENT, prov::AGENT),
        (prov::ORGANIZATION, prov::AGENT),
    ] {
        graph.add(Node::iri(sub), rdfs::SUB_CLASS_OF, Node::iri(sup));
    }
}

pub fn materialize_classes<G: ProvGraph>(graph: &G) -> Result<Classification> {
    let mut classification = Classification::default();
    for class in ProvClass::ALL {
        let query = parse_select_query(&format!(
            "SELECT DISTINCT ?n WHERE {{ ?n a/rdfs:subClassOf* <{}> . }}",
            class.iri()
        ))?;
        let result = graph.select(&query, &Bindings::new())?;
        let members = classification.members_mut(class);
        members.extend(node_column(&result)?);
        debug!(class = ?class, count = members.len(), "classified");
    }

    // Always renderable as the root of a derivation chain.
    let empty = empty_collection();
    classification.entities.insert(empty.clone());
    classification.collections.insert(empty);
    Ok(classification)
}
