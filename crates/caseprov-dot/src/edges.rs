//! Discovery of PROV relations between nodes, in shorthand and qualified form.

use std::collections::{BTreeMap, BTreeSet};

use caseprov_rdf::{parse_select_query, Bindings, Node, ProvGraph};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::options::IncludeCategories;
use crate::rows::node_pairs;
use crate::style::{relation_style, unqualified_style, StyleAttrs};

/// Relation categories, ordered by their short PROV name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RelationKind {
    ActedOnBehalfOf,
    HadMember,
    Used,
    WasAssociatedWith,
    WasAttributedTo,
    WasDerivedFrom,
    WasGeneratedBy,
    WasInformedBy,
}

impl RelationKind {
    pub const ALL: [RelationKind; 8] = [
        RelationKind::ActedOnBehalfOf,
        RelationKind::HadMember,
        RelationKind::Used,
        RelationKind::WasAssociatedWith,
        RelationKind::WasAttributedTo,
        RelationKind::WasDerivedFrom,
        RelationKind::WasGeneratedBy,
        RelationKind::WasInformedBy,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            RelationKind::ActedOnBehalfOf => "actedOnBehalfOf",
            RelationKind::HadMember => "hadMember",
            RelationKind::Used => "used",
            RelationKind::WasAssociatedWith => "wasAssociatedWith",
            RelationKind::WasAttributedTo => "wasAttributedTo",
            RelationKind::WasDerivedFrom => "wasDerivedFrom",
            RelationKind::WasGeneratedBy => "wasGeneratedBy",
            RelationKind::WasInformedBy => "wasInformedBy",
        }
    }

    /// Whether the endpoint classes of this relation are all displayed.
    pub fn is_included(self, include: &IncludeCategories) -> bool {
        let activities = include.activity_informing;
        let agents = include.agent_delegating;
        let entities = include.entity_deriving;
        match self {
            RelationKind::ActedOnBehalfOf => agents,
            RelationKind::HadMember | RelationKind::WasDerivedFrom => entities,
            RelationKind::Used | RelationKind::WasGeneratedBy => activities && entities,
            RelationKind::WasAssociatedWith => activities && agents,
            RelationKind::WasAttributedTo => agents && entities,
            RelationKind::WasInformedBy => activities,
        }
    }

    /// `SELECT ?from ?to` over the shorthand relation.
    fn unqualified_query(self) -> &'static str {
        match self {
            RelationKind::ActedOnBehalfOf => {
                "SELECT ?agent1 ?agent2 WHERE { ?agent1 prov:actedOnBehalfOf ?agent2 . }"
            }
            RelationKind::HadMember => {
                "SELECT ?collection ?entity WHERE { ?collection prov:hadMember ?entity . }"
            }
            RelationKind::Used => "SELECT ?activity ?entity WHERE { ?activity prov:used ?entity . }",
            RelationKind::WasAssociatedWith => {
                "SELECT ?activity ?agent WHERE { ?activity prov:wasAssociatedWith ?agent . }"
            }
            RelationKind::WasAttributedTo => {
                "SELECT ?entity ?agent WHERE { ?entity prov:wasAttributedTo ?agent . }"
            }
            RelationKind::WasDerivedFrom => {
                "SELECT ?entity1 ?entity2 WHERE { ?entity1 prov:wasDerivedFrom ?entity2 . }"
            }
            RelationKind::WasGeneratedBy => {
                "SELECT ?entity ?activity WHERE { ?entity (prov:wasGeneratedBy|^prov:generated) ?activity . }"
            }
            RelationKind::WasInformedBy => {
                "SELECT ?activity1 ?activity2 WHERE { ?activity1 prov:wasInformedBy ?activity2 . }"
            }
        }
    }

    /// `SELECT ?from ?to` through the typed qualifying influence, if PROV-O
    /// defines one.
    fn qualified_query(self) -> Option<&'static str> {
        let text = match self {
            RelationKind::ActedOnBehalfOf => {
                "SELECT ?agent1 ?agent2 WHERE {
                   ?agent1 prov:qualifiedDelegation ?q .
                   ?q a prov:Delegation ; prov:agent ?agent2 .
                 }"
            }
            RelationKind::HadMember => return None,
            RelationKind::Used => {
                "SELECT ?activity ?entity WHERE {
                   ?activity prov:qualifiedUsage ?q .
                   ?q a prov:Usage ; prov:entity ?entity .
                 }"
            }
            RelationKind::WasAssociatedWith => {
                "SELECT ?activity ?agent WHERE {
                   ?activity prov:qualifiedAssociation ?q .
                   ?q a prov:Association ; prov:agent ?agent .
                 }"
            }
            RelationKind::WasAttributedTo => {
                "SELECT ?entity ?agent WHERE {
                   ?entity prov:qualifiedAttribution ?q .
                   ?q a prov:Attribution ; prov:agent ?agent .
                 }"
            }
            RelationKind::WasDerivedFrom => {
                "SELECT ?entity1 ?entity2 WHERE {
                   ?entity1 prov:qualifiedDerivation ?q .
                   ?q a prov:Derivation ; prov:entity ?entity2 .
                 }"
            }
            RelationKind::WasGeneratedBy => {
                "SELECT ?entity ?activity WHERE {
                   ?entity prov:qualifiedGeneration ?q .
                   ?q a prov:Generation ; prov:activity ?activity .
                 }"
            }
            RelationKind::WasInformedBy => {
                "SELECT ?activity1 ?activity2 WHERE {
                   ?activity1 prov:qualifiedCommunication ?q .
                   ?q a prov:Communication ; prov:activity ?activity2 .
                 }"
            }
        };
        Some(text)
    }
}

/// `(from, to)` → relation kind → edge attributes.
///
/// A later insert for the same pair and kind replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeTable {
    edges: BTreeMap<(Node, Node), BTreeMap<RelationKind, StyleAttrs>>,
}

impl EdgeTable {
    pub fn insert(&mut self, from: Node, to: Node, kind: RelationKind, style: StyleAttrs) {
        self.edges.entry((from, to)).or_default().insert(kind, style);
    }

    pub fn get(&self, from: &Node, to: &Node, kind: RelationKind) -> Option<&StyleAttrs> {
        self.edges
            .get(&(from.clone(), to.clone()))
            .and_then(|kinds| kinds.get(&kind))
    }

    /// Edges sorted by source, target, then kind.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node, RelationKind, &StyleAttrs)> {
        self.edges.iter().flat_map(|((from, to), kinds)| {
            kinds.iter().map(move |(kind, style)| (from, to, *kind, style))
        })
    }

    /// Every node that is an endpoint of some edge.
    pub fn endpoints(&self) -> BTreeSet<Node> {
        let mut out = BTreeSet::new();
        for (from, to) in self.edges.keys() {
            out.insert(from.clone());
            out.insert(to.clone());
        }
        out
    }

    /// Number of distinct `(from, to, kind)` edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn discover<G: ProvGraph>(graph: &G, text: &str) -> Result<Vec<(Node, Node)>> {
    let query = parse_select_query(text)?;
    let result = graph.select(&query, &Bindings::new())?;
    node_pairs(&result)
}

/// Pairs of one relation category. The qualified form is only consulted with
/// dashed styling; its pairs come second so they overwrite the shorthand
/// style.
fn discover_category<G: ProvGraph>(
    graph: &G,
    kind: RelationKind,
    dash_unqualified: bool,
) -> Result<Vec<(Node, Node, StyleAttrs)>> {
    let mut found: Vec<(Node, Node, StyleAttrs)> = Vec::new();
    let shorthand = unqualified_style(kind, dash_unqualified);
    for (from, to) in discover(graph, kind.unqualified_query())? {
        found.push((from, to, shorthand.clone()));
    }
    if !dash_unqualified {
        return Ok(found);
    }
    if let Some(text) = kind.qualified_query() {
        let qualified = relation_style(kind);
        for (from, to) in discover(graph, text)? {
            found.push((from, to, qualified.clone()));
        }
    }
    Ok(found)
}

/// Build the edge table for the categories whose endpoints are included.
///
/// A category whose query results are malformed is skipped with a warning;
/// the other categories are unaffected.
pub fn build_edges<G: ProvGraph>(
    graph: &G,
    include: &IncludeCategories,
    dash_unqualified: bool,
) -> EdgeTable {
    let mut table = EdgeTable::default();
    for kind in RelationKind::ALL {
        if !kind.is_included(include) {
            continue;
        }
        match discover_category(graph, kind, dash_unqualified) {
            Ok(found) => {
                debug!(relation = kind.short_name(), count = found.len(), "discovered edges");
                for (from, to, style) in found {
                    table.insert(from, to, kind, style);
                }
            }
            Err(err) => {
                warn!(relation = kind.short_name(), error = %err, "skipping relation category");
            }
        }
    }
    table
}
