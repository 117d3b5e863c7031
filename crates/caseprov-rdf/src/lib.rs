//! RDF support for CASE/PROV-O provenance rendering.
//!
//! This crate is the input side of the renderer:
//!
//! - `term`: IRIs, blank nodes, literals, and triples.
//! - `graph`: an indexed in-memory graph behind the [`ProvGraph`] read trait.
//! - `load`: Sophia-backed parsing of Turtle, N-Triples, N-Quads, TriG, RDF/XML.
//! - `query`: a SPARQL `SELECT` subset with property paths, used for every
//!   class, relation, and ancestry lookup.
//! - `prefix` / `vocab`: namespace bindings and the vocabulary IRIs in use.
//! - `datetime`: `xsd:dateTime` → `xsd:dateTimeStamp` normalization.

pub mod datetime;
pub mod graph;
pub mod load;
pub mod prefix;
pub mod query;
pub mod term;
pub mod vocab;

pub use datetime::xsd_datetime_to_xsd_datetimestamp;
pub use graph::{Graph, ProvGraph};
pub use load::{load_graph_file, load_graph_files, parse_into, RdfFormat};
pub use prefix::PrefixMap;
pub use query::{
    parse_select_query, parse_select_query_with, Bindings, QueryError, QueryResult, SelectQuery,
};
pub use term::{Literal, Node, Term, Triple};
