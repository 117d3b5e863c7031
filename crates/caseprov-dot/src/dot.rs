//! Graph-building output and its Graphviz DOT serialization.

use std::fmt;
use std::io;

use caseprov_rdf::Node;
use sha2::{Digest, Sha256};

use crate::style::StyleAttrs;

/// Receives the rendered nodes and edges, in emission order.
pub trait GraphSink {
    fn add_node(&mut self, id: &str, attrs: &StyleAttrs);
    fn add_edge(&mut self, from: &str, to: &str, attrs: &StyleAttrs);
}

/// DOT node identifier for a graph node: `_` + hex SHA-256 of its string form.
///
/// Source identifiers may start with digits or contain characters DOT
/// would misread; the digest never does.
pub fn node_id(node: &Node) -> String {
    let digest = Sha256::digest(node.to_string().as_bytes());
    let mut out = String::with_capacity(1 + digest.len() * 2);
    out.push('_');
    for byte in digest.iter() {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    pub id: String,
    pub attrs: StyleAttrs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    pub from: String,
    pub to: String,
    pub attrs: StyleAttrs,
}

/// An in-memory directed graph serialized as DOT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotGraph {
    pub name: String,
    pub graph_attrs: StyleAttrs,
    pub nodes: Vec<DotNode>,
    pub edges: Vec<DotEdge>,
}

impl DotGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph_attrs: StyleAttrs::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// The graph the renderer produces: dependency edges point up.
    pub fn prov_render() -> Self {
        let mut graph = Self::new("PROV-O render");
        graph.graph_attrs.set("rankdir", "BT");
        graph
    }

    pub fn node(&self, id: &str) -> Option<&DotNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_between<'a>(&'a self, from: &'a str, to: &'a str) -> impl Iterator<Item = &'a DotEdge> {
        self.edges.iter().filter(move |e| e.from == from && e.to == to)
    }

    pub fn to_dot(&self) -> String {
        self.to_string()
    }

    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.to_dot().as_bytes())
    }
}

impl GraphSink for DotGraph {
    fn add_node(&mut self, id: &str, attrs: &StyleAttrs) {
        self.nodes.push(DotNode {
            id: id.to_string(),
            attrs: attrs.clone(),
        });
    }

    fn add_edge(&mut self, from: &str, to: &str, attrs: &StyleAttrs) {
        self.edges.push(DotEdge {
            from: from.to_string(),
            to: to.to_string(),
            attrs: attrs.clone(),
        });
    }
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

fn attr_list(attrs: &StyleAttrs) -> String {
    let parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", dot_escape(v)))
        .collect();
    parts.join(", ")
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph \"{}\" {{", dot_escape(&self.name))?;
        for (k, v) in self.graph_attrs.iter() {
            writeln!(f, "{k}=\"{}\";", dot_escape(v))?;
        }
        for node in &self.nodes {
            if node.attrs.is_empty() {
                writeln!(f, "\"{}\";", dot_escape(&node.id))?;
            } else {
                writeln!(f, "\"{}\" [{}];", dot_escape(&node.id), attr_list(&node.attrs))?;
            }
        }
        for edge in &self.edges {
            write!(
                f,
                "\"{}\" -> \"{}\"",
                dot_escape(&edge.from),
                dot_escape(&edge.to)
            )?;
            if edge.attrs.is_empty() {
                writeln!(f, ";")?;
            } else {
                writeln!(f, " [{}];", attr_list(&edge.attrs))?;
            }
        }
        writeln!(f, "}}")
    }
}
