//! Indexed in-memory graph and the narrow read interface the renderer uses.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::prefix::PrefixMap;
use crate::query::{self, Bindings, QueryError, QueryResult, SelectQuery};
use crate::term::{Node, Term, Triple};

/// Read-only access to a provenance graph.
///
/// Implementors supply triple-pattern matching; graph-pattern queries default
/// to the bundled evaluator, but an external engine may override `select`.
pub trait ProvGraph {
    /// All statements matching the pattern; `None` is a wildcard.
    fn triples(
        &self,
        subject: Option<&Node>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Vec<&Triple>;

    /// Prefix bindings used to compact identifiers for display.
    fn prefixes(&self) -> &PrefixMap;

    fn select(&self, query: &SelectQuery, bindings: &Bindings) -> Result<QueryResult, QueryError>
    where
        Self: Sized,
    {
        query::evaluate(self, query, bindings)
    }

    fn objects(&self, subject: &Node, predicate: &str) -> Vec<&Term> {
        self.triples(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| &t.object)
            .collect()
    }

    fn subjects(&self, predicate: &str, object: &Term) -> Vec<&Node> {
        self.triples(None, Some(predicate), Some(object))
            .into_iter()
            .map(|t| &t.subject)
            .collect()
    }

    fn contains(&self, subject: Option<&Node>, predicate: Option<&str>, object: Option<&Term>) -> bool {
        !self.triples(subject, predicate, object).is_empty()
    }

    /// Every term occurring in subject or object position.
    fn terms(&self) -> BTreeSet<Term> {
        let mut out = BTreeSet::new();
        for t in self.triples(None, None, None) {
            out.insert(Term::Node(t.subject.clone()));
            out.insert(t.object.clone());
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Node, Vec<usize>>,
    by_predicate: HashMap<String, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
    prefixes: PrefixMap,
    /// Number of parses merged so far; scopes their blank node labels.
    loads: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            prefixes: PrefixMap::with_defaults(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns `false` when the statement was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        let index = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(index);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .push(index);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn add(&mut self, subject: Node, predicate: &str, object: impl Into<Term>) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMap {
        &mut self.prefixes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// A fresh blank node scope for the next parsed document.
    pub(crate) fn next_load_scope(&mut self) -> usize {
        let scope = self.loads;
        self.loads += 1;
        scope
    }

    fn candidates(
        &self,
        subject: Option<&Node>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Option<&[usize]> {
        let slots = [
            subject.map(|s| self.by_subject.get(s)),
            predicate.map(|p| self.by_predicate.get(p)),
            object.map(|o| self.by_object.get(o)),
        ];
        let mut best: Option<&[usize]> = None;
        for slot in slots.into_iter().flatten() {
            let slice = slot.map(Vec::as_slice).unwrap_or(&[]);
            if best.map_or(true, |b| slice.len() < b.len()) {
                best = Some(slice);
            }
        }
        best
    }
}

impl ProvGraph for Graph {
    fn triples(
        &self,
        subject: Option<&Node>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Vec<&Triple> {
        let matches = |t: &Triple| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        };
        match self.candidates(subject, predicate, object) {
            Some(indices) => indices
                .iter()
                .map(|&i| &self.triples[i])
                .filter(|t| matches(t))
                .collect(),
            None => self.triples.iter().collect(),
        }
    }

    fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}
