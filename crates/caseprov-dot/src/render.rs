//! Display records for classified nodes, and tooltips for the instants
//! that qualify them.

use std::collections::{BTreeMap, BTreeSet};

use caseprov_rdf::vocab::{prov, uco_action};
use caseprov_rdf::{Node, ProvGraph, Term};
use tracing::{debug, warn};

use crate::annotate::{AnnotationKind, Annotations};
use crate::classify::Classification;
use crate::style::{node_style, NodeStyle, StyleAttrs};
use crate::temporal::{interval_end_should_exist, EndEvidence};
use crate::wrap::wrap;

/// Instant node → what it marks (e.g. "Start of <activity>").
pub type InstantTooltips = BTreeMap<Node, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedNodes {
    pub nodes: BTreeMap<Node, StyleAttrs>,
    pub instant_tooltips: InstantTooltips,
}

struct NodeRenderer<'a, G: ProvGraph + ?Sized> {
    graph: &'a G,
    annotations: &'a Annotations,
    wrap_width: usize,
    out: RenderedNodes,
}

impl<'a, G: ProvGraph + ?Sized> NodeRenderer<'a, G> {
    fn wrapped(&self, text: &str) -> String {
        wrap(text, self.wrap_width)
    }

    fn append_name(&self, node: &Node, label: &mut String) {
        if !self.annotations.has(AnnotationKind::Name, node) {
            return;
        }
        label.push('\n');
        for name in self.annotations.values(AnnotationKind::Name, node) {
            label.push_str(&self.wrapped(name));
        }
    }

    fn append_labels(&self, node: &Node, label: &mut String) {
        if !self.annotations.has(AnnotationKind::Label, node) {
            return;
        }
        label.push('\n');
        for text in self.annotations.values(AnnotationKind::Label, node) {
            label.push('\n');
            label.push_str(&self.wrapped(text));
        }
    }

    /// Descriptions and comments: each set off by a blank line.
    fn append_paragraphs(&self, kind: AnnotationKind, node: &Node, label: &mut String) {
        for text in self.annotations.values(kind, node) {
            label.push_str("\n\n");
            label.push_str(&self.wrapped(text));
        }
    }

    fn append_common(&self, node: &Node, label: &mut String) {
        self.append_name(node, label);
        self.append_labels(node, label);
        self.append_paragraphs(AnnotationKind::Description, node, label);
        self.append_paragraphs(AnnotationKind::Comment, node, label);
    }

    fn head(&self, node: &Node) -> String {
        self.graph.prefixes().compact(node)
    }

    fn finish(&mut self, node: &Node, base: NodeStyle, label: String) {
        let attrs = node_style(base)
            .with("tooltip", node.to_string())
            .with("label", label);
        self.out.nodes.insert(node.clone(), attrs);
    }

    fn tooltip(&mut self, instant: &Term, text: String) {
        match instant {
            Term::Node(node) => {
                self.out
                    .instant_tooltips
                    .entry(node.clone())
                    .or_default()
                    .insert(text);
            }
            Term::Literal(lit) => {
                warn!(value = %lit, "qualified influence is a literal; no tooltip");
            }
        }
    }

    fn render_agent(&mut self, agent: &Node) {
        let mut label = self.head(agent);
        self.append_common(agent, &mut label);
        self.finish(agent, NodeStyle::Agent, label);
    }

    fn render_entity(&mut self, entity: &Node, is_collection: bool) {
        let mut label = self.head(entity);
        for exhibit in self.annotations.values(AnnotationKind::ExhibitNumber, entity) {
            label.push('\n');
            label.push_str("Exhibit - ");
            label.push_str(exhibit);
        }
        self.append_common(entity, &mut label);
        let base = if is_collection {
            NodeStyle::Collection
        } else {
            NodeStyle::Entity
        };
        self.finish(entity, base, label);

        let graph = self.graph;
        for (predicate, what) in [
            (prov::QUALIFIED_GENERATION, "Generation"),
            (prov::QUALIFIED_INVALIDATION, "Invalidation"),
        ] {
            for instant in graph.objects(entity, predicate) {
                self.tooltip(instant, format!("{what} of {entity}"));
            }
        }
    }

    /// First literal value of `predicate`, in term order.
    fn literal_value(&self, node: &Node, predicate: &str) -> Option<String> {
        let mut values: Vec<&Term> = self.graph.objects(node, predicate);
        values.sort();
        values.into_iter().find_map(|term| match term {
            Term::Literal(lit) => Some(lit.lexical.clone()),
            Term::Node(other) => {
                warn!(subject = %node, object = %other, predicate, "time value is not a literal");
                None
            }
        })
    }

    /// Explicit time property first, then the qualified instant's `prov:atTime`.
    fn time_value(&self, activity: &Node, explicit: [&str; 2], qualified: &str) -> Option<String> {
        explicit
            .into_iter()
            .find_map(|p| self.literal_value(activity, p))
            .or_else(|| {
                let mut instants: Vec<&Term> = self.graph.objects(activity, qualified);
                instants.sort();
                instants
                    .into_iter()
                    .filter_map(Term::as_node)
                    .find_map(|instant| self.literal_value(instant, prov::AT_TIME))
            })
    }

    fn render_activity(&mut self, activity: &Node) {
        let start = self.time_value(
            activity,
            [prov::STARTED_AT_TIME, uco_action::START_TIME],
            prov::QUALIFIED_START,
        );
        let end = self.time_value(
            activity,
            [prov::ENDED_AT_TIME, uco_action::END_TIME],
            prov::QUALIFIED_END,
        );

        let mut label = self.head(activity);
        if start.is_some() || end.is_some() {
            let open = match &start {
                Some(t) => format!("[{t}"),
                None => "(...".to_string(),
            };
            let close = match &end {
                Some(t) => format!("{t}]"),
                None => match interval_end_should_exist(self.graph, activity) {
                    EndEvidence::Known => "...]".to_string(),
                    EndEvidence::Unknown => "...)".to_string(),
                },
            };
            label.push('\n');
            label.push_str(&open);
            label.push_str(", ");
            label.push_str(&close);
        }
        self.append_common(activity, &mut label);
        self.finish(activity, NodeStyle::Activity, label);

        let graph = self.graph;
        for (predicate, what) in [(prov::QUALIFIED_START, "Start"), (prov::QUALIFIED_END, "End")] {
            for instant in graph.objects(activity, predicate) {
                self.tooltip(instant, format!("{what} of {activity}"));
            }
        }
        for usage in graph.objects(activity, prov::QUALIFIED_USAGE) {
            let Some(usage_node) = usage.as_node() else {
                warn!(activity = %activity, value = %usage, "qualified usage is a literal");
                continue;
            };
            for used in graph.objects(usage_node, prov::ENTITY_PROP) {
                match used {
                    Term::Node(entity) => {
                        self.tooltip(usage, format!("Usage of {entity} in {activity}"));
                    }
                    Term::Literal(lit) => {
                        warn!(usage = %usage_node, value = %lit, "used entity is a literal");
                    }
                }
            }
        }
    }
}

/// Render every classified node.
///
/// Agents are styled first, then entities, then activities; a node in
/// several classes keeps the last style.
pub fn render_nodes<G: ProvGraph + ?Sized>(
    graph: &G,
    classification: &Classification,
    annotations: &Annotations,
    wrap_width: usize,
) -> RenderedNodes {
    let mut renderer = NodeRenderer {
        graph,
        annotations,
        wrap_width,
        out: RenderedNodes::default(),
    };
    for agent in &classification.agents {
        renderer.render_agent(agent);
    }
    for entity in &classification.entities {
        renderer.render_entity(entity, classification.collections.contains(entity));
    }
    for activity in &classification.activities {
        renderer.render_activity(activity);
    }
    debug!(
        nodes = renderer.out.nodes.len(),
        instants = renderer.out.instant_tooltips.len(),
        "rendered nodes"
    );
    renderer.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::collect_annotations;
    use crate::classify::{add_prov_axioms, materialize_classes};
    use caseprov_rdf::{parse_into, Graph, RdfFormat};

    const FIXTURE: &str = r#"
@prefix kb: <http://example.org/kb/> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix time: <http://www.w3.org/2006/time#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix case-investigation: <https://ontology.caseontology.org/case/investigation/> .
@prefix uco-core: <https://ontology.unifiedcyberontology.org/uco/core/> .

kb:started-only a prov:Activity ;
    prov:startedAtTime "2020-01-01T00:00:00Z"^^xsd:dateTime .
kb:ended-only a prov:Activity ;
    prov:qualifiedEnd kb:end-1 .
kb:end-1 prov:atTime "2020-01-02T00:00:00Z"^^xsd:dateTime .
kb:both a prov:Activity ;
    prov:startedAtTime "2020-01-01T00:00:00Z"^^xsd:dateTime ;
    prov:qualifiedStart kb:start-2 ;
    prov:endedAtTime "2020-01-03T00:00:00Z"^^xsd:dateTime ;
    prov:qualifiedUsage kb:usage-1 .
kb:start-2 prov:atTime "2019-12-31T00:00:00Z"^^xsd:dateTime .
kb:usage-1 a prov:Usage ; prov:entity kb:evidence .
kb:ends-before a prov:Activity ;
    prov:startedAtTime "2020-01-01T00:00:00Z"^^xsd:dateTime ;
    time:before kb:both .
kb:untimed a prov:Activity .

kb:evidence a prov:Entity ;
    case-investigation:exhibitNumber "2" , "1" ;
    uco-core:name "Thumb drive" ;
    rdfs:label "Label B" , "Label A" ;
    uco-core:description "Seized at the scene." ;
    rdfs:comment "Chain of custody form 7." ;
    prov:qualifiedGeneration kb:generation-1 .
kb:bag a prov:Collection .
kb:examiner a prov:Person .
"#;

    fn rendered() -> RenderedNodes {
        let mut g = Graph::new();
        parse_into(&mut g, FIXTURE.as_bytes(), RdfFormat::Turtle).expect("fixture");
        add_prov_axioms(&mut g);
        let classes = materialize_classes(&g).expect("classify");
        let annotations = collect_annotations(&g);
        render_nodes(&g, &classes, &annotations, 60)
    }

    fn kb(local: &str) -> Node {
        Node::iri(format!("http://example.org/kb/{local}"))
    }

    fn label(r: &RenderedNodes, local: &str) -> String {
        r.nodes[&kb(local)].get("label").expect("label").to_string()
    }

    #[test]
    fn activity_time_brackets() {
        let r = rendered();
        assert_eq!(
            label(&r, "started-only"),
            "kb:started-only\n[2020-01-01T00:00:00Z, ...)"
        );
        assert_eq!(
            label(&r, "ended-only"),
            "kb:ended-only\n(..., 2020-01-02T00:00:00Z]"
        );
        assert_eq!(
            label(&r, "both"),
            "kb:both\n[2020-01-01T00:00:00Z, 2020-01-03T00:00:00Z]"
        );
        assert_eq!(label(&r, "untimed"), "kb:untimed");
    }

    #[test]
    fn inferred_end_closes_the_bracket() {
        let r = rendered();
        assert_eq!(
            label(&r, "ends-before"),
            "kb:ends-before\n[2020-01-01T00:00:00Z, ...]"
        );
    }

    #[test]
    fn entity_label_blocks_in_order() {
        let r = rendered();
        assert_eq!(
            label(&r, "evidence"),
            "kb:evidence\nExhibit - 1\nExhibit - 2\nThumb drive\n\nLabel A\nLabel B\n\nSeized at the scene.\n\nChain of custody form 7."
        );
        let attrs = &r.nodes[&kb("evidence")];
        assert_eq!(attrs.get("tooltip"), Some("http://example.org/kb/evidence"));
        assert_eq!(attrs.get("shape"), Some("oval"));
    }

    #[test]
    fn class_styles() {
        let r = rendered();
        assert_eq!(r.nodes[&kb("bag")].get("shape"), Some("folder"));
        assert_eq!(r.nodes[&kb("examiner")].get("shape"), Some("house"));
        assert_eq!(r.nodes[&kb("both")].get("shape"), Some("box"));
    }

    #[test]
    fn instants_get_tooltips() {
        let r = rendered();
        let tips = |local: &str| -> Vec<String> {
            r.instant_tooltips
                .get(&kb(local))
                .map(|s| s.iter().cloned().collect())
                .unwrap_or_default()
        };
        assert_eq!(tips("end-1"), vec!["End of http://example.org/kb/ended-only"]);
        assert_eq!(tips("start-2"), vec!["Start of http://example.org/kb/both"]);
        assert_eq!(
            tips("usage-1"),
            vec!["Usage of http://example.org/kb/evidence in http://example.org/kb/both"]
        );
        assert_eq!(
            tips("generation-1"),
            vec!["Generation of http://example.org/kb/evidence"]
        );
    }

    #[test]
    fn long_comments_wrap() {
        let mut g = Graph::new();
        g.prefixes_mut().bind("kb", "http://example.org/kb/");
        let e = kb("e");
        g.add(e.clone(), caseprov_rdf::vocab::rdf::TYPE, Node::iri(prov::ENTITY));
        g.add(
            e.clone(),
            caseprov_rdf::vocab::rdfs::COMMENT,
            caseprov_rdf::Literal::plain("aaaa bbbb"),
        );
        let classes = materialize_classes(&g).expect("classify");
        let r = render_nodes(&g, &classes, &collect_annotations(&g), 5);
        assert_eq!(label(&r, "e"), "kb:e\n\naaaa \nbbbb");
    }
}
