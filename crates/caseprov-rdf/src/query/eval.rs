use std::collections::{BTreeSet, VecDeque};

use super::{Bindings, PatternTerm, PropertyPath, QueryError, QueryResult, SelectQuery};
use crate::graph::ProvGraph;
use crate::term::Term;

type Pairs = BTreeSet<(Term, Term)>;

/// Evaluate `query` over `graph`, seeding every solution with `initial`.
///
/// Patterns are joined left to right. Rows are sorted so results are stable
/// across runs; duplicates are kept unless the query says `DISTINCT`.
pub fn evaluate<G: ProvGraph + ?Sized>(
    graph: &G,
    query: &SelectQuery,
    initial: &Bindings,
) -> Result<QueryResult, QueryError> {
    let mut solutions: Vec<Bindings> = vec![initial.clone()];
    for pattern in &query.patterns {
        let mut next: Vec<Bindings> = Vec::new();
        for solution in &solutions {
            let subject = pattern.subject.resolve(solution);
            let object = pattern.object.resolve(solution);
            for (s, o) in eval_path(graph, &pattern.path, subject, object) {
                let mut extended = solution.clone();
                if bind(&mut extended, &pattern.subject, s) && bind(&mut extended, &pattern.object, o)
                {
                    next.push(extended);
                }
            }
        }
        solutions = next;
        if solutions.is_empty() {
            break;
        }
    }

    let vars = query.selected_vars();
    let mut rows: Vec<Vec<Term>> = Vec::with_capacity(solutions.len());
    for solution in &solutions {
        let mut row = Vec::with_capacity(vars.len());
        for var in &vars {
            match solution.get(var) {
                Some(term) => row.push(term.clone()),
                None => return Err(QueryError::UnboundProjection(var.clone())),
            }
        }
        rows.push(row);
    }
    rows.sort();
    if query.distinct {
        rows.dedup();
    }
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    Ok(QueryResult { vars, rows })
}

fn bind(bindings: &mut Bindings, slot: &PatternTerm, value: Term) -> bool {
    match slot {
        PatternTerm::Const(term) => *term == value,
        PatternTerm::Var(name) => match bindings.get(name) {
            Some(existing) => *existing == value,
            None => {
                bindings.insert(name.clone(), value);
                true
            }
        },
    }
}

/// All `(start, end)` pairs connected by `path`, constrained by whichever
/// endpoints are already known.
fn eval_path<G: ProvGraph + ?Sized>(
    graph: &G,
    path: &PropertyPath,
    subject: Option<&Term>,
    object: Option<&Term>,
) -> Pairs {
    match path {
        PropertyPath::Predicate(predicate) => {
            let subject_node = match subject {
                Some(Term::Node(node)) => Some(node),
                Some(Term::Literal(_)) => return Pairs::new(),
                None => None,
            };
            graph
                .triples(subject_node, Some(predicate), object)
                .into_iter()
                .map(|t| (Term::Node(t.subject.clone()), t.object.clone()))
                .collect()
        }
        PropertyPath::Inverse(inner) => eval_path(graph, inner, object, subject)
            .into_iter()
            .map(|(s, o)| (o, s))
            .collect(),
        PropertyPath::Sequence(parts) => eval_sequence(graph, parts, subject, object),
        PropertyPath::Alternative(options) => {
            let mut out = Pairs::new();
            for option in options {
                out.extend(eval_path(graph, option, subject, object));
            }
            out
        }
        PropertyPath::ZeroOrMore(inner) => eval_closure(graph, inner, subject, object, true),
        PropertyPath::OneOrMore(inner) => eval_closure(graph, inner, subject, object, false),
        PropertyPath::ZeroOrOne(inner) => {
            let mut out = eval_path(graph, inner, subject, object);
            out.extend(zero_length(graph, subject, object));
            out
        }
    }
}

fn eval_sequence<G: ProvGraph + ?Sized>(
    graph: &G,
    parts: &[PropertyPath],
    subject: Option<&Term>,
    object: Option<&Term>,
) -> Pairs {
    match parts {
        [] => zero_length(graph, subject, object),
        [only] => eval_path(graph, only, subject, object),
        [first, rest @ ..] => {
            let mut out = Pairs::new();
            if subject.is_none() && object.is_some() {
                // Anchor on the known end and walk leftwards.
                for (middle, end) in eval_sequence(graph, rest, None, object) {
                    for (start, _) in eval_path(graph, first, None, Some(&middle)) {
                        out.insert((start, end.clone()));
                    }
                }
            } else {
                for (start, middle) in eval_path(graph, first, subject, None) {
                    for (_, end) in eval_sequence(graph, rest, Some(&middle), object) {
                        out.insert((start.clone(), end));
                    }
                }
            }
            out
        }
    }
}

fn zero_length<G: ProvGraph + ?Sized>(
    graph: &G,
    subject: Option<&Term>,
    object: Option<&Term>,
) -> Pairs {
    match (subject, object) {
        (Some(s), Some(o)) if s == o => [(s.clone(), o.clone())].into_iter().collect(),
        (Some(_), Some(_)) => Pairs::new(),
        (Some(t), None) | (None, Some(t)) => [(t.clone(), t.clone())].into_iter().collect(),
        (None, None) => graph.terms().into_iter().map(|t| (t.clone(), t)).collect(),
    }
}

fn eval_closure<G: ProvGraph + ?Sized>(
    graph: &G,
    inner: &PropertyPath,
    subject: Option<&Term>,
    object: Option<&Term>,
    reflexive: bool,
) -> Pairs {
    let mut out = Pairs::new();
    match (subject, object) {
        (Some(start), _) => {
            for end in reachable(graph, inner, start, reflexive, false) {
                if object.map_or(true, |o| *o == end) {
                    out.insert((start.clone(), end));
                }
            }
        }
        (None, Some(end)) => {
            for start in reachable(graph, inner, end, reflexive, true) {
                out.insert((start, end.clone()));
            }
        }
        (None, None) => {
            for start in graph.terms() {
                for end in reachable(graph, inner, &start, reflexive, false) {
                    out.insert((start.clone(), end));
                }
            }
        }
    }
    out
}

/// Breadth-first closure of `inner` from `origin`, walking backwards when
/// `backwards` is set.
fn reachable<G: ProvGraph + ?Sized>(
    graph: &G,
    inner: &PropertyPath,
    origin: &Term,
    reflexive: bool,
    backwards: bool,
) -> BTreeSet<Term> {
    let mut seen: BTreeSet<Term> = BTreeSet::new();
    let mut queue: VecDeque<Term> = VecDeque::new();
    if reflexive {
        seen.insert(origin.clone());
    }
    queue.push_back(origin.clone());
    while let Some(current) = queue.pop_front() {
        let step = if backwards {
            eval_path(graph, inner, None, Some(&current))
                .into_iter()
                .map(|(s, _)| s)
                .collect::<Vec<_>>()
        } else {
            eval_path(graph, inner, Some(&current), None)
                .into_iter()
                .map(|(_, o)| o)
                .collect::<Vec<_>>()
        };
        for next in step {
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::query::parse_select_query;
    use crate::term::{Literal, Node};
    use crate::vocab::{prov, rdf, rdfs};

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn chain_graph() -> Graph {
        let mut g = Graph::new();
        let ex = |s: &str| Node::iri(format!("http://example.org/{s}"));
        g.add(ex("e3"), prov::WAS_DERIVED_FROM, ex("e2"));
        g.add(ex("e2"), prov::WAS_DERIVED_FROM, ex("e1"));
        g.add(ex("e1"), rdf::TYPE, ex("Doc"));
        g.add(ex("Doc"), rdfs::SUB_CLASS_OF, Node::iri(prov::ENTITY));
        g.add(ex("e2"), rdf::TYPE, Node::iri(prov::ENTITY));
        g.add(ex("a1"), prov::GENERATED, ex("e3"));
        g.add(ex("e2"), prov::WAS_GENERATED_BY, ex("a0"));
        g.add(ex("e1"), rdfs::LABEL, Literal::plain("first"));
        g
    }

    fn column(result: &QueryResult, index: usize) -> Vec<String> {
        result.rows.iter().map(|r| r[index].to_string()).collect()
    }

    #[test]
    fn subclass_closure_finds_direct_and_indirect_instances() {
        let g = chain_graph();
        let q = parse_select_query(
            "SELECT ?n WHERE { ?n a/rdfs:subClassOf* prov:Entity . }",
        )
        .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(
            column(&result, 0),
            vec!["http://example.org/e1", "http://example.org/e2"]
        );
    }

    #[test]
    fn zero_or_more_includes_the_start_node() {
        let g = chain_graph();
        let q = parse_select_query("SELECT ?e WHERE { ?t prov:wasDerivedFrom* ?e }")
            .expect("query");
        let mut bindings = Bindings::new();
        bindings.insert("t".to_string(), iri("http://example.org/e3"));
        let result = evaluate(&g, &q, &bindings).expect("eval");
        assert_eq!(
            column(&result, 0),
            vec![
                "http://example.org/e1",
                "http://example.org/e2",
                "http://example.org/e3"
            ]
        );
    }

    #[test]
    fn one_or_more_excludes_the_start_unless_cyclic() {
        let g = chain_graph();
        let q = parse_select_query("SELECT ?e WHERE { <http://example.org/e3> prov:wasDerivedFrom+ ?e }")
            .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn alternative_with_inverse_merges_both_forms() {
        let g = chain_graph();
        let q = parse_select_query(
            "SELECT ?e ?a WHERE { ?e (prov:wasGeneratedBy|^prov:generated) ?a . }",
        )
        .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(
            result.rows,
            vec![
                vec![iri("http://example.org/e2"), iri("http://example.org/a0")],
                vec![iri("http://example.org/e3"), iri("http://example.org/a1")],
            ]
        );
    }

    #[test]
    fn object_anchored_sequence_walks_leftwards() {
        let g = chain_graph();
        let q = parse_select_query(
            "SELECT ?x WHERE { ?x prov:wasDerivedFrom/prov:wasDerivedFrom <http://example.org/e1> }",
        )
        .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(column(&result, 0), vec!["http://example.org/e3"]);
    }

    #[test]
    fn join_respects_shared_variables() {
        let g = chain_graph();
        let q = parse_select_query(
            "SELECT ?x ?l WHERE { ?x prov:wasDerivedFrom ?y . ?y rdfs:label ?l . }",
        )
        .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0][0], iri("http://example.org/e2"));
        assert_eq!(result.rows[0][1], Term::Literal(Literal::plain("first")));
    }

    #[test]
    fn literal_subjects_never_match() {
        let g = chain_graph();
        let q = parse_select_query("SELECT ?y WHERE { ?l rdfs:label ?x . ?x rdfs:label ?y . }")
            .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert!(result.is_empty());
    }

    #[test]
    fn distinct_and_limit_shape_the_rows() {
        let g = chain_graph();
        let q = parse_select_query(
            "SELECT DISTINCT ?x WHERE { ?x prov:wasDerivedFrom* ?y } LIMIT 2",
        )
        .expect("query");
        let result = evaluate(&g, &q, &Bindings::new()).expect("eval");
        assert_eq!(result.rows.len(), 2);
        assert_ne!(result.rows[0], result.rows[1]);
    }
}
