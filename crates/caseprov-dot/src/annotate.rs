//! Free-text metadata printed into node labels.

use std::collections::{BTreeMap, BTreeSet};

use caseprov_rdf::vocab::{case_investigation, rdfs, uco_core};
use caseprov_rdf::{Node, ProvGraph, Term};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AnnotationKind {
    Comment,
    Label,
    Name,
    Description,
    ExhibitNumber,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 5] = [
        AnnotationKind::Comment,
        AnnotationKind::Label,
        AnnotationKind::Name,
        AnnotationKind::Description,
        AnnotationKind::ExhibitNumber,
    ];

    pub fn predicate(self) -> &'static str {
        match self {
            AnnotationKind::Comment => rdfs::COMMENT,
            AnnotationKind::Label => rdfs::LABEL,
            AnnotationKind::Name => uco_core::NAME,
            AnnotationKind::Description => uco_core::DESCRIPTION,
            AnnotationKind::ExhibitNumber => case_investigation::EXHIBIT_NUMBER,
        }
    }
}

/// Node → its values; a `BTreeSet` keeps them deduplicated and sorted.
pub type AnnotationMap = BTreeMap<Node, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotations {
    maps: BTreeMap<AnnotationKind, AnnotationMap>,
}

impl Annotations {
    pub fn insert(&mut self, kind: AnnotationKind, node: Node, value: impl Into<String>) {
        self.maps
            .entry(kind)
            .or_default()
            .entry(node)
            .or_default()
            .insert(value.into());
    }

    pub fn map(&self, kind: AnnotationKind) -> Option<&AnnotationMap> {
        self.maps.get(&kind)
    }

    /// Values of `kind` on `node`, in sorted order.
    pub fn values<'a>(&'a self, kind: AnnotationKind, node: &Node) -> impl Iterator<Item = &'a str> {
        self.maps
            .get(&kind)
            .and_then(|m| m.get(node))
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn has(&self, kind: AnnotationKind, node: &Node) -> bool {
        self.values(kind, node).next().is_some()
    }
}

/// One pass per annotation predicate. Non-literal values are skipped.
pub fn collect_annotations<G: ProvGraph + ?Sized>(graph: &G) -> Annotations {
    let mut annotations = Annotations::default();
    for kind in AnnotationKind::ALL {
        let mut count = 0usize;
        for triple in graph.triples(None, Some(kind.predicate()), None) {
            match &triple.object {
                Term::Literal(lit) => {
                    annotations.insert(kind, triple.subject.clone(), lit.lexical.clone());
                    count += 1;
                }
                Term::Node(node) => {
                    warn!(subject = %triple.subject, object = %node, ?kind, "annotation is not a literal; skipped");
                }
            }
        }
        debug!(?kind, count, "collected annotations");
    }
    annotations
}
