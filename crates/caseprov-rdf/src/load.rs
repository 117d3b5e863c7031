//! Loading RDF files into a [`Graph`] with Sophia.
//!
//! Supported serializations:
//! - N-Triples (`.nt`)
//! - Turtle (`.ttl`)
//! - N-Quads (`.nq`)
//! - TriG (`.trig`)
//! - RDF/XML (`.rdf`, `.owl`, `.xml`)
//!
//! Named graphs are flattened into the single default graph.

use anyhow::{anyhow, Context, Result};
use sophia::api::quad::Quad as _;
use sophia::api::source::{QuadSource, TripleSource};
use sophia::api::term::{Term as RdfTerm, TermKind};
use sophia::api::triple::Triple as _;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::graph::Graph;
use crate::term::{Literal, Node, Term, Triple};
use crate::vocab::xsd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    NQuads,
    TriG,
    RdfXml,
}

impl RdfFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "nt" | "ntriples" => Ok(Self::NTriples),
            "ttl" | "turtle" => Ok(Self::Turtle),
            "nq" | "nquads" => Ok(Self::NQuads),
            "trig" => Ok(Self::TriG),
            "rdf" | "owl" | "xml" => Ok(Self::RdfXml),
            other => Err(anyhow!(
                "unsupported RDF format `.{other}` for {}",
                path.display()
            )),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NTriples => "N-Triples",
            Self::Turtle => "Turtle",
            Self::NQuads => "N-Quads",
            Self::TriG => "TriG",
            Self::RdfXml => "RDF/XML",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct LoadSinkError {
    message: String,
}

impl From<anyhow::Error> for LoadSinkError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// Blank node labels are local to one document; `scope` keeps them apart
/// when several documents are merged.
fn node_from<T: RdfTerm>(term: T, scope: usize) -> Result<Node> {
    match term.kind() {
        TermKind::Iri => term
            .iri()
            .map(|iri| Node::Iri(iri.as_str().to_string()))
            .ok_or_else(|| anyhow!("IRI term without an IRI")),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Node::BlankNode(format!("f{scope}_{}", id.as_str())))
            .ok_or_else(|| anyhow!("blank node term without an identifier")),
        other => Err(anyhow!("expected IRI or blank node, got {other:?}")),
    }
}

fn term_from<T: RdfTerm>(term: T, scope: usize) -> Result<Term> {
    if term.kind() != TermKind::Literal {
        return node_from(term, scope).map(Term::Node);
    }
    let lexical = term
        .lexical_form()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let language = term.language_tag().map(|tag| tag.as_str().to_string());
    // Plain and xsd:string literals are the same term.
    let datatype = if language.is_some() {
        None
    } else {
        term.datatype()
            .map(|dt| dt.as_str().to_string())
            .filter(|dt| dt != xsd::STRING)
    };
    Ok(Term::Literal(Literal {
        lexical,
        datatype,
        language,
    }))
}

fn collect_triples<S: TripleSource>(
    mut source: S,
    format: RdfFormat,
    scope: usize,
) -> Result<Vec<Triple>> {
    let mut out: Vec<Triple> = Vec::new();
    source
        .try_for_each_triple(|t| -> std::result::Result<(), LoadSinkError> {
            let subject = node_from(t.s(), scope)?;
            let Node::Iri(predicate) = node_from(t.p(), scope)? else {
                return Ok(());
            };
            let object = term_from(t.o(), scope)?;
            out.push(Triple {
                subject,
                predicate,
                object,
            });
            Ok(())
        })
        .map_err(|e| anyhow!("failed to parse {}: {e}", format.label()))?;
    Ok(out)
}

fn collect_quads<S: QuadSource>(
    mut source: S,
    format: RdfFormat,
    scope: usize,
) -> Result<Vec<Triple>> {
    let mut out: Vec<Triple> = Vec::new();
    source
        .try_for_each_quad(|q| -> std::result::Result<(), LoadSinkError> {
            let subject = node_from(q.s(), scope)?;
            let Node::Iri(predicate) = node_from(q.p(), scope)? else {
                return Ok(());
            };
            let object = term_from(q.o(), scope)?;
            out.push(Triple {
                subject,
                predicate,
                object,
            });
            Ok(())
        })
        .map_err(|e| anyhow!("failed to parse {}: {e}", format.label()))?;
    Ok(out)
}

/// Parse `bytes` into `graph`, returning how many new statements were added.
///
/// Each call is a separate document: its blank nodes never merge with blank
/// nodes already in `graph`.
pub fn parse_into(graph: &mut Graph, bytes: &[u8], format: RdfFormat) -> Result<usize> {
    let scope = graph.next_load_scope();
    let reader = BufReader::new(std::io::Cursor::new(bytes));
    let triples = match format {
        RdfFormat::NTriples => {
            collect_triples(sophia::turtle::parser::nt::parse_bufread(reader), format, scope)?
        }
        RdfFormat::Turtle => {
            collect_triples(sophia::turtle::parser::turtle::parse_bufread(reader), format, scope)?
        }
        RdfFormat::NQuads => {
            collect_quads(sophia::turtle::parser::nq::parse_bufread(reader), format, scope)?
        }
        RdfFormat::TriG => {
            collect_quads(sophia::turtle::parser::trig::parse_bufread(reader), format, scope)?
        }
        RdfFormat::RdfXml => collect_triples(sophia::xml::parser::parse_bufread(reader), format, scope)?,
    };

    if matches!(format, RdfFormat::Turtle | RdfFormat::TriG) {
        if let Ok(text) = std::str::from_utf8(bytes) {
            graph.prefixes_mut().harvest_turtle(text);
        }
    }

    let before = graph.len();
    graph.extend(triples);
    Ok(graph.len() - before)
}

pub fn load_graph_file(graph: &mut Graph, path: &Path) -> Result<usize> {
    let format = RdfFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let added = parse_into(graph, &bytes, format)
        .with_context(|| format!("loading {}", path.display()))?;
    debug!(path = %path.display(), added, "loaded graph file");
    Ok(added)
}

/// Merge every file into one graph.
pub fn load_graph_files<P: AsRef<Path>>(paths: &[P]) -> Result<Graph> {
    let mut graph = Graph::new();
    for path in paths {
        load_graph_file(&mut graph, path.as_ref())?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ProvGraph;
    use std::collections::BTreeSet;
    use crate::vocab::{prov, rdfs};

    const SAMPLE_TTL: &str = r#"
@prefix kb: <http://example.org/kb/> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

kb:act-1
    a prov:Activity ;
    rdfs:label "Acquisition"@en ;
    prov:startedAtTime "2020-01-02T03:04:05Z"^^xsd:dateTime ;
    prov:qualifiedStart [ prov:atTime "2020-01-02T03:04:05Z"^^xsd:dateTime ] ;
    .
kb:file-1 rdfs:comment "plain"^^xsd:string .
"#;

    #[test]
    fn parses_turtle_terms_and_harvests_prefixes() -> Result<()> {
        let mut g = Graph::new();
        let added = parse_into(&mut g, SAMPLE_TTL.as_bytes(), RdfFormat::Turtle)?;
        assert_eq!(added, 6);
        assert_eq!(g.prefixes().namespace("kb"), Some("http://example.org/kb/"));

        let act = Node::iri("http://example.org/kb/act-1");
        assert_eq!(
            g.objects(&act, rdfs::LABEL),
            vec![&Term::Literal(Literal::lang("Acquisition", "en"))]
        );
        let start = g.objects(&act, prov::QUALIFIED_START);
        assert!(matches!(start.as_slice(), [Term::Node(Node::BlankNode(_))]));

        let file = Node::iri("http://example.org/kb/file-1");
        assert_eq!(
            g.objects(&file, rdfs::COMMENT),
            vec![&Term::Literal(Literal::plain("plain"))]
        );
        Ok(())
    }

    #[test]
    fn parses_ntriples() -> Result<()> {
        let nt = "<http://example.org/a> <http://www.w3.org/ns/prov#wasDerivedFrom> <http://example.org/b> .\n";
        let mut g = Graph::new();
        assert_eq!(parse_into(&mut g, nt.as_bytes(), RdfFormat::NTriples)?, 1);
        assert!(g.contains(
            Some(&Node::iri("http://example.org/a")),
            Some(prov::WAS_DERIVED_FROM),
            Some(&Term::iri("http://example.org/b")),
        ));
        Ok(())
    }

    #[test]
    fn merges_files_and_rejects_unknown_extensions() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let first = dir.path().join("one.ttl");
        let second = dir.path().join("two.nt");
        std::fs::write(&first, SAMPLE_TTL)?;
        std::fs::write(
            &second,
            "<http://example.org/kb/act-1> <http://www.w3.org/ns/prov#used> <http://example.org/kb/file-1> .\n",
        )?;
        let g = load_graph_files(&[&first, &second])?;
        assert_eq!(g.len(), 7);

        let bogus = dir.path().join("three.csv");
        std::fs::write(&bogus, "a,b,c\n")?;
        assert!(load_graph_files(&[&bogus]).is_err());
        Ok(())
    }

    #[test]
    fn blank_nodes_are_scoped_to_their_document() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let first = dir.path().join("one.ttl");
        let second = dir.path().join("two.ttl");
        let doc = |n: u8| {
            format!(
                "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
                 _:b0 rdfs:label \"label {n}\" .\n\
                 [] rdfs:comment \"comment {n}\" .\n"
            )
        };
        std::fs::write(&first, doc(1))?;
        std::fs::write(&second, doc(2))?;
        let g = load_graph_files(&[&first, &second])?;

        let labelled: BTreeSet<&Node> = g
            .triples(None, Some(rdfs::LABEL), None)
            .into_iter()
            .map(|t| &t.subject)
            .collect();
        let commented: BTreeSet<&Node> = g
            .triples(None, Some(rdfs::COMMENT), None)
            .into_iter()
            .map(|t| &t.subject)
            .collect();
        assert_eq!(labelled.len(), 2);
        assert_eq!(commented.len(), 2);
        assert!(labelled.is_disjoint(&commented));

        let mut same = Graph::new();
        parse_into(&mut same, doc(1).as_bytes(), RdfFormat::Turtle)?;
        parse_into(&mut same, doc(1).as_bytes(), RdfFormat::Turtle)?;
        assert_eq!(same.len(), 4, "re-parsing a document adds fresh blank nodes");
        Ok(())
    }

    #[test]
    fn syntax_errors_surface_with_format_name() {
        let mut g = Graph::new();
        let err = parse_into(&mut g, b"<http://a> <http://b> .", RdfFormat::NTriples).unwrap_err();
        assert!(err.to_string().contains("N-Triples"));
    }
}
