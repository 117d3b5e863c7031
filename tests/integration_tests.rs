//! Integration tests for the complete rendering pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - RDF file loading → classification → DOT output
//! - Terminal selection and category reduction
//! - Temporal completeness and timestamp normalization
//!
//! Run with: cargo test --test integration_tests

use std::collections::BTreeSet;
use std::fs;

use caseprov_dot::{
    add_prov_axioms, empty_collection, interval_end_should_exist, materialize_classes, node_id,
    render_provenance, EndEvidence, IncludeCategories, RenderOptions, TerminalSelector,
};
use caseprov_rdf::vocab::{prov, time, xsd};
use caseprov_rdf::{
    load_graph_files, parse_into, xsd_datetime_to_xsd_datetimestamp, Graph, Literal, Node,
    RdfFormat,
};
use tempfile::tempdir;

const INVESTIGATION: &str = r#"
@prefix kb: <http://example.org/kb/> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix time: <http://www.w3.org/2006/time#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix case-investigation: <https://ontology.caseontology.org/case/investigation/> .

kb:lead a prov:Person .
kb:examiner a prov:Person ;
    prov:actedOnBehalfOf kb:lead .

kb:seize a prov:Activity ;
    prov:used prov:EmptyCollection ;
    prov:wasAssociatedWith kb:examiner ;
    prov:startedAtTime "2022-05-01T09:00:00Z"^^xsd:dateTime ;
    prov:endedAtTime "2022-05-01T10:00:00Z"^^xsd:dateTime ;
    time:before kb:image-disk .
kb:image-disk a prov:Activity ;
    prov:wasInformedBy kb:seize ;
    prov:startedAtTime "2022-05-02T09:00:00Z"^^xsd:dateTime .

kb:phone a prov:Entity ;
    case-investigation:exhibitNumber "A-1" ;
    prov:wasDerivedFrom prov:EmptyCollection ;
    prov:wasGeneratedBy kb:seize .
kb:phone-image a prov:Entity ;
    rdfs:comment "Full physical image." ;
    prov:wasDerivedFrom kb:phone ;
    prov:wasGeneratedBy kb:image-disk .
kb:exhibits a prov:Collection ;
    prov:hadMember kb:phone .
kb:stray a prov:Entity .
"#;

fn kb(local: &str) -> Node {
    Node::iri(format!("http://example.org/kb/{local}"))
}

fn investigation() -> Graph {
    let mut g = Graph::new();
    parse_into(&mut g, INVESTIGATION.as_bytes(), RdfFormat::Turtle).expect("fixture");
    add_prov_axioms(&mut g);
    g
}

// ============================================================================
// Loading and rendering
// ============================================================================

#[test]
fn test_load_files_and_render_everything() {
    let dir = tempdir().expect("tempdir");
    let (head, tail) = INVESTIGATION.split_at(
        INVESTIGATION
            .find("kb:phone a")
            .expect("split point"),
    );
    let prefixes: String = head
        .lines()
        .filter(|l| l.starts_with("@prefix"))
        .map(|l| format!("{l}\n"))
        .collect();
    let first = dir.path().join("agents-activities.ttl");
    let second = dir.path().join("entities.ttl");
    fs::write(&first, head).expect("write");
    fs::write(&second, format!("{prefixes}{tail}")).expect("write");

    let mut graph = load_graph_files(&[&first, &second]).expect("load");
    add_prov_axioms(&mut graph);
    let render = render_provenance(&graph, &RenderOptions::default()).expect("render");

    assert_eq!(
        render.analysis.display,
        render.analysis.classification.universe()
    );
    let dot = render.dot.to_dot();
    assert!(dot.contains("kb:phone\\nExhibit - A-1"));
    assert!(dot.contains("kb:seize\\n[2022-05-01T09:00:00Z, 2022-05-01T10:00:00Z]"));
    assert!(dot.contains("kb:image-disk\\n[2022-05-02T09:00:00Z, ...)"));
    assert!(dot.contains("kb:phone-image\\n\\nFull physical image."));
    assert!(dot.contains("shape=\"folder\""));
}

#[test]
fn test_blank_nodes_stay_apart_across_files() {
    let dir = tempdir().expect("tempdir");
    let doc = |activity: &str, time: &str| {
        format!(
            "@prefix kb: <http://example.org/kb/> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
kb:{activity} a prov:Activity ; prov:qualifiedStart _:b0 .
_:b0 prov:atTime \"{time}\"^^xsd:dateTime .
"
        )
    };
    let first = dir.path().join("first.ttl");
    let second = dir.path().join("second.ttl");
    fs::write(&first, doc("early", "2020-01-01T00:00:00Z")).expect("write");
    fs::write(&second, doc("late", "2021-01-01T00:00:00Z")).expect("write");

    let mut graph = load_graph_files(&[&first, &second]).expect("load");
    add_prov_axioms(&mut graph);
    let render = render_provenance(&graph, &RenderOptions::default()).expect("render");
    let dot = render.dot.to_dot();
    assert!(dot.contains("kb:early\\n[2020-01-01T00:00:00Z, ...)"));
    assert!(dot.contains("kb:late\\n[2021-01-01T00:00:00Z, ...)"));
    assert_eq!(render.analysis.instant_tooltips.len(), 2);
    for tips in render.analysis.instant_tooltips.values() {
        assert_eq!(tips.len(), 1);
    }
}

#[test]
fn test_every_edge_joins_displayed_nodes() {
    let graph = investigation();
    let render = render_provenance(
        &graph,
        &RenderOptions {
            terminal: TerminalSelector::Iri("http://example.org/kb/phone-image".into()),
            ..RenderOptions::default()
        },
    )
    .expect("render");
    let ids: BTreeSet<String> = render.dot.nodes.iter().map(|n| n.id.clone()).collect();
    for edge in &render.dot.edges {
        assert!(ids.contains(&edge.from) && ids.contains(&edge.to));
    }
    assert!(!ids.contains(&node_id(&kb("stray"))));
    assert!(!ids.contains(&node_id(&kb("exhibits"))));
}

// ============================================================================
// Reduction
// ============================================================================

#[test]
fn test_ancestry_of_derived_image() {
    let render = render_provenance(
        &investigation(),
        &RenderOptions {
            terminal: TerminalSelector::Iri("http://example.org/kb/phone-image".into()),
            ..RenderOptions::default()
        },
    )
    .expect("render");
    let expected: BTreeSet<Node> = [
        kb("phone-image"),
        kb("phone"),
        empty_collection(),
        kb("image-disk"),
        kb("seize"),
        kb("examiner"),
        kb("lead"),
    ]
    .into_iter()
    .collect();
    assert_eq!(render.analysis.display, expected);
}

#[test]
fn test_agent_category_only() {
    let render = render_provenance(
        &investigation(),
        &RenderOptions {
            include: IncludeCategories {
                agent_delegating: true,
                ..IncludeCategories::default()
            },
            ..RenderOptions::default()
        },
    )
    .expect("render");
    let expected: BTreeSet<Node> = [kb("examiner"), kb("lead")].into_iter().collect();
    assert_eq!(render.analysis.display, expected);
    assert_eq!(render.dot.edges.len(), 1);
    assert_eq!(render.dot.edges[0].attrs.get("label"), Some("actedOnBehalfOf"));
}

#[test]
fn test_temporal_edge_between_displayed_activities() {
    let render = render_provenance(&investigation(), &RenderOptions::default()).expect("render");
    assert!(render
        .analysis
        .temporal_edges
        .contains(&(kb("image-disk"), kb("seize"))));
    let last = render.dot.edges.last().expect("edges");
    assert_eq!(last.attrs.get("style"), Some("invis"));
    assert_eq!(last.from, node_id(&kb("image-disk")));
}

// ============================================================================
// Classification and temporal inference
// ============================================================================

#[test]
fn test_classification_is_idempotent_and_has_empty_collection() {
    let graph = investigation();
    let first = materialize_classes(&graph).expect("classify");
    let second = materialize_classes(&graph).expect("classify");
    assert_eq!(first, second);
    assert!(first.entities.contains(&empty_collection()));
    assert!(first.collections.contains(&empty_collection()));
    assert!(first.entities.contains(&kb("exhibits")));
    assert!(first.agents.contains(&kb("lead")));
}

#[test]
fn test_end_evidence_from_subject_and_object_statements() {
    let mut g = Graph::new();
    g.add(kb("a"), time::INTERVAL_MEETS, kb("b"));
    g.add(kb("c"), time::AFTER, kb("d"));
    assert_eq!(interval_end_should_exist(&g, &kb("a")), EndEvidence::Known);
    assert_eq!(interval_end_should_exist(&g, &kb("d")), EndEvidence::Known);
    assert_eq!(interval_end_should_exist(&g, &kb("c")), EndEvidence::Unknown);
    g.add(kb("e"), prov::ENDED_AT_TIME, Literal::typed("2020-01-01T00:00:00Z", xsd::DATE_TIME));
    assert!(interval_end_should_exist(&g, &kb("e")).is_known());
}

#[test]
fn test_timestamp_normalization() {
    let stamp = xsd_datetime_to_xsd_datetimestamp(&Literal::typed(
        "2022-05-01T09:00:00Z",
        xsd::DATE_TIME,
    ))
    .expect("has timezone");
    assert_eq!(stamp.datatype.as_deref(), Some(xsd::DATE_TIME_STAMP));
    assert!(xsd_datetime_to_xsd_datetimestamp(&Literal::typed(
        "2022-05-01T09:00:00",
        xsd::DATE_TIME
    ))
    .is_none());
}
