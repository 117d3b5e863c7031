//! Whether an interval's end is known to exist.
//!
//! Open-world: evidence can only establish that an end exists. Absence of
//! evidence yields [`EndEvidence::Unknown`], never "no end".

use caseprov_rdf::vocab::{prov, time, uco_action};
use caseprov_rdf::{Node, ProvGraph, Term};
use serde::Serialize;

/// Properties that, used with the interval as subject, require a determinate
/// end.
pub const END_IMPLIED_AS_SUBJECT: &[&str] = &[
    prov::ENDED_AT_TIME,
    time::BEFORE,
    time::INTERVAL_BEFORE,
    time::INTERVAL_DISJOINT,
    time::INTERVAL_DURING,
    time::INTERVAL_EQUALS,
    time::INTERVAL_FINISHED_BY,
    time::INTERVAL_FINISHES,
    time::INTERVAL_IN,
    time::INTERVAL_MEETS,
    time::INTERVAL_OVERLAPS,
    time::INTERVAL_STARTS,
    uco_action::END_TIME,
];

/// Properties that, used with the interval as object, require a determinate
/// end.
pub const END_IMPLIED_AS_OBJECT: &[&str] = &[
    time::AFTER,
    time::INTERVAL_AFTER,
    time::INTERVAL_CONTAINS,
    time::INTERVAL_EQUALS,
    time::INTERVAL_FINISHED_BY,
    time::INTERVAL_FINISHES,
    time::INTERVAL_MET_BY,
    time::INTERVAL_OVERLAPPED_BY,
    time::INTERVAL_STARTED_BY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndEvidence {
    Known,
    Unknown,
}

impl EndEvidence {
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known)
    }
}

/// Does the graph imply that `interval` has an end?
///
/// `interval` is not checked to actually be an interval, activity, or action.
pub fn interval_end_should_exist<G: ProvGraph + ?Sized>(graph: &G, interval: &Node) -> EndEvidence {
    let as_subject = END_IMPLIED_AS_SUBJECT
        .iter()
        .any(|&p| graph.contains(Some(interval), Some(p), None));
    if as_subject {
        return EndEvidence::Known;
    }

    let object = Term::Node(interval.clone());
    let as_object = END_IMPLIED_AS_OBJECT
        .iter()
        .any(|&p| graph.contains(None, Some(p), Some(&object)));
    if as_object {
        EndEvidence::Known
    } else {
        EndEvidence::Unknown
    }
}
