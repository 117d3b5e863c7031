//! Graph-pattern queries: a SPARQL `SELECT` subset.
//!
//! Supported surface:
//! - `PREFIX p: <iri>` declarations (on top of the default bindings),
//! - `SELECT [DISTINCT] ?v ... | *` with an optional `WHERE` keyword,
//! - basic graph patterns with `;` and `,` abbreviations,
//! - property paths `^p`, `p/q`, `p|q`, `p*`, `p+`, `p?`, `( ... )`,
//! - an optional trailing `LIMIT n`.
//!
//! Non-goals: `OPTIONAL`, `FILTER`, `UNION` groups, aggregates, and blank
//! node labels inside patterns.

mod eval;
mod parse;

use std::collections::BTreeMap;

use crate::prefix::PrefixMap;
use crate::term::Term;

pub use eval::evaluate;
pub use parse::{parse_select_query, parse_select_query_with};

/// Variable name (without the leading `?`) to bound value.
pub type Bindings = BTreeMap<String, Term>;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("failed to parse query: {0}")]
    Syntax(String),
    #[error("undeclared prefix `{0}:`")]
    UnknownPrefix(String),
    #[error("projected variable ?{0} does not occur in the query")]
    UnboundProjection(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Vars(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternTerm {
    Var(String),
    Const(Term),
}

impl PatternTerm {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    fn resolve<'a>(&'a self, bindings: &'a Bindings) -> Option<&'a Term> {
        match self {
            Self::Var(name) => bindings.get(name),
            Self::Const(term) => Some(term),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Predicate(String),
    Inverse(Box<PropertyPath>),
    Sequence(Vec<PropertyPath>),
    Alternative(Vec<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub path: PropertyPath,
    pub object: PatternTerm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub prefixes: PrefixMap,
    pub projection: Projection,
    pub distinct: bool,
    pub patterns: Vec<TriplePattern>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// Variables in first-occurrence order.
    pub fn pattern_vars(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for p in &self.patterns {
            for t in [&p.subject, &p.object] {
                if let PatternTerm::Var(v) = t {
                    if !out.contains(v) {
                        out.push(v.clone());
                    }
                }
            }
        }
        out
    }

    /// The projected variables, resolving `SELECT *`.
    pub fn selected_vars(&self) -> Vec<String> {
        match &self.projection {
            Projection::All => self.pattern_vars(),
            Projection::Vars(vars) => vars.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub vars: Vec<String>,
    pub rows: Vec<Vec<Term>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
