//! Render a PROV-O / CASE provenance graph as a reduced, annotated Graphviz
//! DOT graph.
//!
//! The pipeline runs once over an immutable graph:
//!
//! 1. classify every node as Activity / Agent / Entity / Collection;
//! 2. collect text annotations and build one display record per node;
//! 3. discover relation edges, qualified and shorthand;
//! 4. reduce to the chain of ancestry ∩ chain of influence;
//! 5. emit nodes, relation edges, and invisible temporal layout edges.
//!
//! Output goes through [`GraphSink`]; [`DotGraph`] is the DOT implementation.

pub mod ancestry;
pub mod annotate;
pub mod classify;
pub mod dot;
pub mod edges;
pub mod error;
pub mod influence;
pub mod options;
pub mod ordering;
pub mod render;
mod rows;
pub mod select;
pub mod style;
pub mod temporal;
pub mod wrap;

use std::collections::BTreeSet;

use caseprov_rdf::{Node, ProvGraph};
use serde::Serialize;
use tracing::{debug, warn};

pub use ancestry::{ancestry_chain, resolve_terminal_query};
pub use annotate::{collect_annotations, AnnotationKind, Annotations};
pub use classify::{add_prov_axioms, empty_collection, materialize_classes, Classification, ProvClass};
pub use dot::{node_id, DotGraph, GraphSink};
pub use edges::{build_edges, EdgeTable, RelationKind};
pub use error::{ProvDotError, Result};
pub use influence::influence_chain;
pub use options::{IncludeCategories, RenderOptions, TerminalSelector, DEFAULT_WRAP_WIDTH};
pub use ordering::temporal_ordering_edges;
pub use render::{render_nodes, InstantTooltips, RenderedNodes};
pub use select::{select_display_set, Closure};
pub use style::{invisible_edge_style, StyleAttrs};
pub use temporal::{interval_end_should_exist, EndEvidence};

/// Everything derived while rendering, kept for inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvAnalysis {
    pub classification: Classification,
    pub annotations: Annotations,
    #[serde(skip)]
    pub edges: EdgeTable,
    pub display: BTreeSet<Node>,
    pub instant_tooltips: InstantTooltips,
    /// `(later, earlier)` pairs drawn as invisible edges.
    pub temporal_edges: BTreeSet<(Node, Node)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvRender {
    pub dot: DotGraph,
    pub analysis: ProvAnalysis,
}

/// Run the pipeline and emit into `sink`.
///
/// Nodes are emitted sorted, then relation edges sorted by
/// `(from, to, kind)` and limited to displayed endpoints, then the invisible
/// temporal edges.
pub fn render_into<G: ProvGraph, S: GraphSink>(
    graph: &G,
    options: &RenderOptions,
    sink: &mut S,
) -> Result<ProvAnalysis> {
    let classification = materialize_classes(graph)?;
    let annotations = collect_annotations(graph);
    let rendered = render_nodes(graph, &classification, &annotations, options.wrap_width);

    let edges = build_edges(graph, &options.include.effective(), options.dash_unqualified);
    debug!(edges = edges.len(), "edge table");

    let ancestry = ancestry_chain(graph, &options.terminal)?;
    let influence = influence_chain(&edges, &options.include, &classification);
    let display = select_display_set(
        &ancestry,
        &influence,
        &classification.universe(),
        options.omit_empty_collection,
    );
    let shown = display.len();
    debug!(shown, "display set");

    for node in &display {
        match rendered.nodes.get(node) {
            Some(attrs) => sink.add_node(&node_id(node), attrs),
            None => warn!(node = %node, "display node has no rendering"),
        }
    }
    for (from, to, _kind, style) in edges.iter() {
        if display.contains(from) && display.contains(to) {
            sink.add_edge(&node_id(from), &node_id(to), style);
        }
    }
    let temporal_edges = temporal_ordering_edges(graph, &display);
    let invisible = invisible_edge_style();
    for (later, earlier) in &temporal_edges {
        sink.add_edge(&node_id(later), &node_id(earlier), &invisible);
    }

    Ok(ProvAnalysis {
        classification,
        annotations,
        edges,
        display,
        instant_tooltips: rendered.instant_tooltips,
        temporal_edges,
    })
}

/// Render `graph` into a [`DotGraph`].
pub fn render_provenance<G: ProvGraph>(graph: &G, options: &RenderOptions) -> Result<ProvRender> {
    let mut dot = DotGraph::prov_render();
    let analysis = render_into(graph, options, &mut dot)?;
    Ok(ProvRender { dot, analysis })
}
