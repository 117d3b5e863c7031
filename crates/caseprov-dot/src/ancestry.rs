//! The chain of ancestry: causal history of the selected terminal nodes.

use std::collections::BTreeSet;

use caseprov_rdf::{
    parse_select_query, parse_select_query_with, Bindings, Node, ProvGraph, SelectQuery, Term,
};
use tracing::{debug, warn};

use crate::classify::empty_collection;
use crate::error::{ProvDotError, Result};
use crate::options::TerminalSelector;
use crate::rows::node_column;
use crate::select::Closure;

/// Activities reached by `wasInformedBy*` from the terminal's generator.
const TERMINAL_ACTIVITIES: &str = "
SELECT ?activity WHERE {
  ?terminal prov:wasGeneratedBy ?endActivity .
  ?endActivity prov:wasInformedBy* ?activity .
}";

/// Agents associated with those activities, and whom they acted for.
const TERMINAL_AGENTS: &str = "
SELECT ?agent WHERE {
  ?terminal prov:wasGeneratedBy ?endActivity .
  ?endActivity prov:wasInformedBy* ?activity .
  ?activity prov:wasAssociatedWith ?associatedAgent .
  ?associatedAgent prov:actedOnBehalfOf* ?agent .
}";

/// Entities the terminal derives from, the terminal included.
const TERMINAL_ENTITIES: &str = "
SELECT ?entity WHERE {
  ?terminal prov:wasDerivedFrom* ?entity .
}";

const EMPTY_SET_ACTIVITIES: &str = "
SELECT ?activity WHERE {
  ?activity prov:used prov:EmptyCollection .
}";

const EMPTY_SET_AGENTS: &str = "
SELECT ?agent WHERE {
  ?activity prov:used prov:EmptyCollection .
  ?activity prov:wasAssociatedWith ?associatedAgent .
  ?associatedAgent prov:actedOnBehalfOf* ?agent .
}";

const EMPTY_SET_ENTITIES: &str = "
SELECT ?entity WHERE {
  ?entity prov:wasDerivedFrom prov:EmptyCollection .
}";

/// Run a caller-supplied terminal query. Every bound value must be an IRI.
pub fn resolve_terminal_query<G: ProvGraph>(graph: &G, text: &str) -> Result<BTreeSet<Node>> {
    debug!(query = text, "resolving terminal query");
    let query = parse_select_query_with(text, graph.prefixes())?;
    let result = graph.select(&query, &Bindings::new())?;
    let mut terminals = BTreeSet::new();
    for row in &result.rows {
        for (var, term) in result.vars.iter().zip(row) {
            match term {
                Term::Node(node @ Node::Iri(_)) => {
                    terminals.insert(node.clone());
                }
                other => {
                    return Err(ProvDotError::TerminalQuery {
                        var: var.clone(),
                        value: other.to_string(),
                    })
                }
            }
        }
    }
    Ok(terminals)
}

fn run(graph: &impl ProvGraph, query: &SelectQuery, bindings: &Bindings) -> Result<Vec<Node>> {
    let result = graph.select(query, bindings)?;
    node_column(&result)
}

fn empty_set_chain<G: ProvGraph>(graph: &G) -> Result<BTreeSet<Node>> {
    let mut chain = BTreeSet::from([empty_collection()]);
    for (label, text) in [
        ("activities", EMPTY_SET_ACTIVITIES),
        ("agents", EMPTY_SET_AGENTS),
        ("entities", EMPTY_SET_ENTITIES),
    ] {
        let query = parse_select_query(text)?;
        match run(graph, &query, &Bindings::new()) {
            Ok(nodes) => chain.extend(nodes),
            Err(err) => warn!(label, error = %err, "skipping empty-set ancestry query"),
        }
        debug!(label, count = chain.len(), "ancestry from the empty set");
    }
    Ok(chain)
}

fn terminal_chain<G: ProvGraph>(
    graph: &G,
    terminals: &BTreeSet<Node>,
    chain: &mut BTreeSet<Node>,
) -> Result<()> {
    for (label, text) in [
        ("activities", TERMINAL_ACTIVITIES),
        ("agents", TERMINAL_AGENTS),
        ("entities", TERMINAL_ENTITIES),
    ] {
        let query = parse_select_query(text)?;
        for node in terminals {
            let bindings = Bindings::from([("terminal".to_string(), Term::Node(node.clone()))]);
            match run(graph, &query, &bindings) {
                Ok(nodes) => chain.extend(nodes),
                Err(err) => warn!(label, terminal = %node, error = %err, "skipping terminal"),
            }
        }
        debug!(label, count = chain.len(), "ancestry chain");
    }
    Ok(())
}

/// The chain of ancestry for `terminal`.
///
/// Per-terminal results of the wrong shape are skipped with a warning. A
/// terminal query that cannot be resolved fails the whole computation.
pub fn ancestry_chain<G: ProvGraph>(graph: &G, terminal: &TerminalSelector) -> Result<Closure> {
    let mut chain: BTreeSet<Node> = BTreeSet::new();
    let terminals = match terminal {
        TerminalSelector::None => return Ok(Closure::Unrestricted),
        TerminalSelector::EmptyCollection => return empty_set_chain(graph).map(Closure::Restricted),
        TerminalSelector::Iri(iri) => {
            // An explicit terminal is displayed even when nothing derives it.
            let node = Node::iri(iri.as_str());
            chain.insert(node.clone());
            BTreeSet::from([node])
        }
        TerminalSelector::QueryText(text) => resolve_terminal_query(graph, text)?,
    };
    debug!(count = terminals.len(), "terminal nodes");
    terminal_chain(graph, &terminals, &mut chain)?;
    Ok(Closure::Restricted(chain))
}
