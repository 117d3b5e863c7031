//! Invisible layout edges that make time read downwards.
//!
//! Edges point from the later node to the earlier one, the same direction
//! as PROV dependency edges. Follows the OWL-Time / PROV-O alignment.

use std::collections::BTreeSet;

use caseprov_rdf::vocab::time;
use caseprov_rdf::{Node, ProvGraph, Term};
use tracing::debug;

/// Temporal predicates and whether their subject is the later node.
const ORDERING_PREDICATES: &[(&str, bool)] = &[
    (time::AFTER, true),
    (time::BEFORE, false),
    (time::INTERVAL_AFTER, true),
    (time::INTERVAL_BEFORE, false),
];

/// `(later, earlier)` pairs between displayed IRI nodes.
pub fn temporal_ordering_edges<G: ProvGraph + ?Sized>(
    graph: &G,
    display: &BTreeSet<Node>,
) -> BTreeSet<(Node, Node)> {
    let mut pairs = BTreeSet::new();
    for &(predicate, subject_is_later) in ORDERING_PREDICATES {
        for triple in graph.triples(None, Some(predicate), None) {
            let (subject, object) = match (&triple.subject, &triple.object) {
                (s @ Node::Iri(_), Term::Node(o @ Node::Iri(_))) => (s, o),
                _ => continue,
            };
            if !display.contains(subject) || !display.contains(object) {
                continue;
            }
            if subject_is_later {
                pairs.insert((subject.clone(), object.clone()));
            } else {
                pairs.insert((object.clone(), subject.clone()));
            }
        }
    }
    debug!(count = pairs.len(), "temporal ordering edges");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseprov_rdf::Graph;

    fn n(name: &str) -> Node {
        Node::iri(format!("urn:{name}"))
    }

    #[test]
    fn before_points_from_later_to_earlier() {
        let mut g = Graph::new();
        g.add(n("first"), time::BEFORE, n("second"));
        let display: BTreeSet<Node> = [n("first"), n("second")].into_iter().collect();
        let pairs = temporal_ordering_edges(&g, &display);
        assert_eq!(pairs, [(n("second"), n("first"))].into_iter().collect());
    }

    #[test]
    fn after_and_before_of_one_fact_collapse() {
        let mut g = Graph::new();
        g.add(n("first"), time::INTERVAL_BEFORE, n("second"));
        g.add(n("second"), time::INTERVAL_AFTER, n("first"));
        let display: BTreeSet<Node> = [n("first"), n("second")].into_iter().collect();
        assert_eq!(temporal_ordering_edges(&g, &display).len(), 1);
    }

    #[test]
    fn both_ends_must_be_displayed_iris() {
        let mut g = Graph::new();
        g.add(n("first"), time::BEFORE, n("second"));
        g.add(Node::blank("b0"), time::BEFORE, n("first"));
        let display: BTreeSet<Node> = [n("first"), Node::blank("b0")].into_iter().collect();
        assert!(temporal_ordering_edges(&g, &display).is_empty());
    }
}
