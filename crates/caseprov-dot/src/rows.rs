//! Shape checks on query results.

use caseprov_rdf::{Node, QueryResult, Term};

use crate::error::{ProvDotError, Result};

fn identifier(result: &QueryResult, column: usize, term: &Term) -> Result<Node> {
    match term {
        Term::Node(node) => Ok(node.clone()),
        Term::Literal(lit) => Err(ProvDotError::NonIdentifier {
            var: result.vars.get(column).cloned().unwrap_or_default(),
            value: lit.lexical.clone(),
        }),
    }
}

/// The first column of every row, which must hold identifiers.
pub(crate) fn node_column(result: &QueryResult) -> Result<Vec<Node>> {
    result
        .rows
        .iter()
        .filter_map(|row| row.first())
        .map(|term| identifier(result, 0, term))
        .collect()
}

/// The first two columns of every row, both identifiers.
pub(crate) fn node_pairs(result: &QueryResult) -> Result<Vec<(Node, Node)>> {
    let mut out = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        if let [first, second, ..] = row.as_slice() {
            out.push((
                identifier(result, 0, first)?,
                identifier(result, 1, second)?,
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseprov_rdf::Literal;

    #[test]
    fn literals_are_shape_violations() {
        let result = QueryResult {
            vars: vec!["a".into(), "b".into()],
            rows: vec![vec![Term::iri("urn:x"), Term::Literal(Literal::plain("oops"))]],
        };
        assert_eq!(node_column(&result).expect("first column"), vec![Node::iri("urn:x")]);
        match node_pairs(&result) {
            Err(ProvDotError::NonIdentifier { var, value }) => {
                assert_eq!(var, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("expected a shape violation, got {other:?}"),
        }
    }
}
