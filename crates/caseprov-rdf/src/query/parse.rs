use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag, tag_no_case, take_while, take_while1};
use nom::character::complete::{char as pchar, digit1, multispace1, one_of, satisfy};
use nom::combinator::{map, map_res, not, opt, recognize, value};
use nom::error::{Error, ErrorKind};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

use super::{PatternTerm, Projection, PropertyPath, QueryError, SelectQuery, TriplePattern};
use crate::prefix::PrefixMap;
use crate::term::{Literal, Term};
use crate::vocab::rdf;

/// Parse a query against the default prefix bindings.
pub fn parse_select_query(text: &str) -> Result<SelectQuery, QueryError> {
    parse_select_query_with(text, &PrefixMap::with_defaults())
}

/// Parse a query; `PREFIX` declarations in `text` override `base`.
pub fn parse_select_query_with(text: &str, base: &PrefixMap) -> Result<SelectQuery, QueryError> {
    let (rest, declared) = prologue(text).map_err(|e| to_query_error(text, e))?;
    let mut prefixes = base.clone();
    for (prefix, ns) in declared {
        prefixes.bind(prefix, ns);
    }

    let parser = QueryParser {
        prefixes: &prefixes,
    };
    let (rest, (distinct, projection, patterns, limit)) =
        parser.select(rest).map_err(|e| to_query_error(text, e))?;
    let (rest, _) = sp(rest).map_err(|e| to_query_error(text, e))?;
    if !rest.is_empty() {
        return Err(QueryError::Syntax(format!(
            "trailing input at byte {}: {}",
            text.len() - rest.len(),
            snippet(rest)
        )));
    }

    let query = SelectQuery {
        prefixes,
        projection,
        distinct,
        patterns,
        limit,
    };
    if let Projection::Vars(vars) = &query.projection {
        let known = query.pattern_vars();
        if let Some(missing) = vars.iter().find(|v| !known.contains(v)) {
            return Err(QueryError::UnboundProjection(missing.clone()));
        }
    }
    Ok(query)
}

fn to_query_error(text: &str, err: nom::Err<Error<&str>>) -> QueryError {
    match err {
        nom::Err::Failure(e) if e.code == ErrorKind::Verify => {
            let prefix = e.input.split(':').next().unwrap_or_default();
            QueryError::UnknownPrefix(prefix.to_string())
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => QueryError::Syntax(format!(
            "unexpected input at byte {}: {}",
            text.len() - e.input.len(),
            snippet(e.input)
        )),
        nom::Err::Incomplete(_) => QueryError::Syntax("incomplete input".to_string()),
    }
}

fn snippet(s: &str) -> String {
    let s = s.trim_start();
    if s.is_empty() {
        return "end of input".to_string();
    }
    let cut: String = s.chars().take(24).collect();
    format!("`{cut}`")
}

// =============================================================================
// Tokens
// =============================================================================

/// Whitespace and `#` comments.
fn sp(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            multispace1,
            recognize(pair(pchar('#'), opt(is_not("\r\n")))),
        ))),
    )(input)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(word), not(satisfy(is_name_char)))
}

fn prologue(input: &str) -> IResult<&str, Vec<(String, String)>> {
    many0(preceded(sp, prefix_decl))(input)
}

fn prefix_decl(input: &str) -> IResult<&str, (String, String)> {
    map(
        tuple((
            keyword("PREFIX"),
            sp,
            pn_prefix,
            pchar(':'),
            sp,
            iri_ref,
        )),
        |(_, _, prefix, _, _, ns)| (prefix.to_string(), ns.to_string()),
    )(input)
}

fn pn_prefix(input: &str) -> IResult<&str, &str> {
    recognize(opt(pair(
        satisfy(|c| c.is_alphabetic()),
        take_while(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')),
    )))(input)
}

/// Local part of a prefixed name; a trailing `.` terminates the triple instead.
fn pn_local(input: &str) -> IResult<&str, &str> {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let local = input[..end].trim_end_matches('.');
    Ok((&input[local.len()..], local))
}

fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(
        pchar('<'),
        take_while(|c: char| c != '>' && !c.is_whitespace()),
        pchar('>'),
    )(input)
}

fn variable(input: &str) -> IResult<&str, String> {
    map(
        preceded(one_of("?$"), take_while1(is_name_char)),
        |s: &str| s.to_string(),
    )(input)
}

fn string_lit(input: &str) -> IResult<&str, String> {
    let esc = escaped_transform(
        is_not("\\\""),
        '\\',
        alt((
            map(tag("\\"), |_| "\\"),
            map(tag("\""), |_| "\""),
            map(tag("n"), |_| "\n"),
            map(tag("t"), |_| "\t"),
            map(tag("r"), |_| "\r"),
        )),
    );
    delimited(pchar('"'), map(opt(esc), Option::unwrap_or_default), pchar('"'))(input)
}

fn single_string_lit(input: &str) -> IResult<&str, String> {
    let esc = escaped_transform(
        is_not("\\'"),
        '\\',
        alt((
            map(tag("\\"), |_| "\\"),
            map(tag("'"), |_| "'"),
            map(tag("n"), |_| "\n"),
            map(tag("t"), |_| "\t"),
            map(tag("r"), |_| "\r"),
        )),
    );
    delimited(pchar('\''), map(opt(esc), Option::unwrap_or_default), pchar('\''))(input)
}

fn language_tag(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-')(input)
}

fn limit_clause(input: &str) -> IResult<&str, usize> {
    preceded(
        tuple((sp, keyword("LIMIT"), sp)),
        map_res(digit1, |s: &str| s.parse::<usize>()),
    )(input)
}

// =============================================================================
// Prefix-aware grammar
// =============================================================================

struct QueryParser<'p> {
    prefixes: &'p PrefixMap,
}

type SelectParts = (bool, Projection, Vec<TriplePattern>, Option<usize>);

impl<'p> QueryParser<'p> {
    fn select<'a>(&self, input: &'a str) -> IResult<&'a str, SelectParts> {
        let (rest, _) = preceded(sp, keyword("SELECT"))(input)?;
        let (rest, modifier) =
            opt(preceded(sp, alt((keyword("DISTINCT"), keyword("REDUCED")))))(rest)?;
        let (rest, projection) = preceded(
            sp,
            alt((
                value(Projection::All, pchar('*')),
                map(many1(preceded(sp, variable)), Projection::Vars),
            )),
        )(rest)?;
        let (rest, _) = opt(preceded(sp, keyword("WHERE")))(rest)?;
        let (rest, _) = sp(rest)?;
        let (rest, patterns) = self.group(rest)?;
        let (rest, limit) = opt(limit_clause)(rest)?;
        Ok((rest, (modifier.is_some(), projection, patterns, limit)))
    }

    fn group<'a>(&self, input: &'a str) -> IResult<&'a str, Vec<TriplePattern>> {
        let (mut rest, _) = pair(pchar('{'), sp)(input)?;
        let mut out = Vec::new();
        loop {
            let (r, close) = opt(pchar('}'))(rest)?;
            if close.is_some() {
                return Ok((r, out));
            }
            let (r, subject) = self.subject(r)?;
            let (r, _) = sp(r)?;
            let (r, pairs) = self.predicate_object_list(r)?;
            for (path, objects) in pairs {
                for object in objects {
                    out.push(TriplePattern {
                        subject: subject.clone(),
                        path: path.clone(),
                        object,
                    });
                }
            }
            let (r, _) = sp(r)?;
            let (r, _) = opt(pchar('.'))(r)?;
            let (r, _) = sp(r)?;
            rest = r;
        }
    }

    fn predicate_object_list<'a>(
        &self,
        input: &'a str,
    ) -> IResult<&'a str, Vec<(PropertyPath, Vec<PatternTerm>)>> {
        let (mut rest, first) = self.predicate_objects(input)?;
        let mut out = vec![first];
        loop {
            let (r, semicolon) = opt(preceded(sp, pchar(';')))(rest)?;
            if semicolon.is_none() {
                return Ok((rest, out));
            }
            let (r, _) = sp(r)?;
            rest = r;
            // A dangling `;` before `.` or `}` is legal.
            match self.predicate_objects(rest) {
                Ok((r, po)) => {
                    out.push(po);
                    rest = r;
                }
                Err(nom::Err::Error(_)) => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn predicate_objects<'a>(
        &self,
        input: &'a str,
    ) -> IResult<&'a str, (PropertyPath, Vec<PatternTerm>)> {
        let (rest, path) = self.path(input)?;
        let (rest, _) = sp(rest)?;
        let (rest, objects) = separated_list1(
            delimited(sp, pchar(','), sp),
            |i: &'a str| self.object(i),
        )(rest)?;
        Ok((rest, (path, objects)))
    }

    fn subject<'a>(&self, input: &'a str) -> IResult<&'a str, PatternTerm> {
        alt((
            map(variable, PatternTerm::Var),
            map(|i: &'a str| self.iri(i), |iri| PatternTerm::Const(Term::iri(iri))),
        ))(input)
    }

    fn object<'a>(&self, input: &'a str) -> IResult<&'a str, PatternTerm> {
        alt((
            map(variable, PatternTerm::Var),
            map(
                |i: &'a str| self.literal(i),
                |lit| PatternTerm::Const(Term::Literal(lit)),
            ),
            map(|i: &'a str| self.iri(i), |iri| PatternTerm::Const(Term::iri(iri))),
        ))(input)
    }

    fn literal<'a>(&self, input: &'a str) -> IResult<&'a str, Literal> {
        let (rest, lexical) = alt((string_lit, single_string_lit))(input)?;
        if let (rest, Some(lang)) = opt(preceded(pchar('@'), language_tag))(rest)? {
            return Ok((rest, Literal::lang(lexical, lang)));
        }
        if let (rest, Some(dt)) = opt(preceded(tag("^^"), |i: &'a str| self.iri(i)))(rest)? {
            return Ok((rest, Literal::typed(lexical, dt)));
        }
        Ok((rest, Literal::plain(lexical)))
    }

    fn iri<'a>(&self, input: &'a str) -> IResult<&'a str, String> {
        alt((
            map(iri_ref, str::to_string),
            |i: &'a str| self.prefixed_name(i),
        ))(input)
    }

    fn prefixed_name<'a>(&self, input: &'a str) -> IResult<&'a str, String> {
        let (rest, prefix) = pn_prefix(input)?;
        let (rest, _) = pchar(':')(rest)?;
        let (rest, local) = pn_local(rest)?;
        match self.prefixes.expand(prefix, local) {
            Some(iri) => Ok((rest, iri)),
            None => Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify))),
        }
    }

    fn path<'a>(&self, input: &'a str) -> IResult<&'a str, PropertyPath> {
        map(
            separated_list1(delimited(sp, pchar('|'), sp), |i: &'a str| {
                self.path_sequence(i)
            }),
            |mut parts| {
                if parts.len() == 1 {
                    parts.remove(0)
                } else {
                    PropertyPath::Alternative(parts)
                }
            },
        )(input)
    }

    fn path_sequence<'a>(&self, input: &'a str) -> IResult<&'a str, PropertyPath> {
        map(
            separated_list1(delimited(sp, pchar('/'), sp), |i: &'a str| {
                self.path_elt_or_inverse(i)
            }),
            |mut parts| {
                if parts.len() == 1 {
                    parts.remove(0)
                } else {
                    PropertyPath::Sequence(parts)
                }
            },
        )(input)
    }

    fn path_elt_or_inverse<'a>(&self, input: &'a str) -> IResult<&'a str, PropertyPath> {
        alt((
            map(
                preceded(pair(pchar('^'), sp), |i: &'a str| self.path_elt(i)),
                |p| PropertyPath::Inverse(Box::new(p)),
            ),
            |i: &'a str| self.path_elt(i),
        ))(input)
    }

    fn path_elt<'a>(&self, input: &'a str) -> IResult<&'a str, PropertyPath> {
        let (rest, primary) = self.path_primary(input)?;
        let (rest, modifier) = opt(one_of("*+?"))(rest)?;
        let path = match modifier {
            Some('*') => PropertyPath::ZeroOrMore(Box::new(primary)),
            Some('+') => PropertyPath::OneOrMore(Box::new(primary)),
            Some('?') => PropertyPath::ZeroOrOne(Box::new(primary)),
            _ => primary,
        };
        Ok((rest, path))
    }

    fn path_primary<'a>(&self, input: &'a str) -> IResult<&'a str, PropertyPath> {
        alt((
            map(|i: &'a str| self.iri(i), PropertyPath::Predicate),
            map(keyword("a"), |_| PropertyPath::Predicate(rdf::TYPE.to_string())),
            delimited(
                pair(pchar('('), sp),
                |i: &'a str| self.path(i),
                pair(sp, pchar(')')),
            ),
        ))(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{prov, rdfs};

    fn pred(iri: &str) -> PropertyPath {
        PropertyPath::Predicate(iri.to_string())
    }

    #[test]
    fn parses_subclass_closure_query() {
        let q = parse_select_query(
            "SELECT ?nActivity\nWHERE {\n  ?nActivity a/rdfs:subClassOf* prov:Activity .\n}\n",
        )
        .expect("query");
        assert_eq!(q.projection, Projection::Vars(vec!["nActivity".to_string()]));
        assert_eq!(q.patterns.len(), 1);
        assert_eq!(
            q.patterns[0].path,
            PropertyPath::Sequence(vec![
                pred(rdf::TYPE),
                PropertyPath::ZeroOrMore(Box::new(pred(rdfs::SUB_CLASS_OF))),
            ])
        );
        assert_eq!(
            q.patterns[0].object,
            PatternTerm::Const(Term::iri(prov::ACTIVITY))
        );
    }

    #[test]
    fn expands_predicate_object_lists_with_dangling_semicolons() {
        let q = parse_select_query(
            r#"
SELECT ?nAgent1 ?nAgent2
WHERE {
  ?nAgent1
    prov:qualifiedDelegation ?nDelegation ;
    .
  ?nDelegation
    a prov:Delegation ;
    prov:agent ?nAgent2 ;
    .
}
"#,
        )
        .expect("query");
        assert_eq!(q.patterns.len(), 3);
        assert_eq!(q.patterns[1].path, pred(rdf::TYPE));
        assert_eq!(q.patterns[2].object, PatternTerm::var("nAgent2"));
    }

    #[test]
    fn parses_alternative_with_inverse() {
        let q = parse_select_query(
            "SELECT ?e ?a WHERE { ?e (prov:wasGeneratedBy|^prov:generated) ?a . }",
        )
        .expect("query");
        assert_eq!(
            q.patterns[0].path,
            PropertyPath::Alternative(vec![
                pred(prov::WAS_GENERATED_BY),
                PropertyPath::Inverse(Box::new(pred(prov::GENERATED))),
            ])
        );
    }

    #[test]
    fn declared_prefixes_comments_and_literals() {
        let q = parse_select_query(
            r#"
# Find the exhibit.
PREFIX kb: <http://example.org/kb/>
SELECT DISTINCT * WHERE {
  ?x case-investigation:exhibitNumber "1", 'two' ; # trailing comment
     rdfs:label "hi"@en .
  ?x kb:rank "3"^^xsd:integer
} LIMIT 5
"#,
        )
        .expect("query");
        assert!(q.distinct);
        assert_eq!(q.limit, Some(5));
        assert_eq!(q.patterns.len(), 4);
        assert_eq!(
            q.patterns[1].object,
            PatternTerm::Const(Term::Literal(Literal::plain("two")))
        );
        assert_eq!(
            q.patterns[2].object,
            PatternTerm::Const(Term::Literal(Literal::lang("hi", "en")))
        );
        assert_eq!(
            q.patterns[3].path,
            pred("http://example.org/kb/rank")
        );
        assert_eq!(q.selected_vars(), vec!["x".to_string()]);
    }

    #[test]
    fn object_prefixed_name_before_final_dot() {
        let q = parse_select_query("SELECT ?a WHERE { ?a prov:used prov:EmptyCollection.}")
            .expect("query");
        assert_eq!(
            q.patterns[0].object,
            PatternTerm::Const(Term::iri(prov::EMPTY_COLLECTION))
        );
    }

    #[test]
    fn unknown_prefix_is_reported_by_name() {
        let err = parse_select_query("SELECT ?a WHERE { ?a nope:thing ?b }").unwrap_err();
        assert!(matches!(err, QueryError::UnknownPrefix(p) if p == "nope"));
    }

    #[test]
    fn projection_must_occur_in_patterns() {
        let err = parse_select_query("SELECT ?zzz WHERE { ?a prov:used ?b }").unwrap_err();
        assert!(matches!(err, QueryError::UnboundProjection(v) if v == "zzz"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_select_query("SELECT ?a WHERE { ?a prov:used ?b } garbage").unwrap_err();
        assert!(matches!(err, QueryError::Syntax(_)));
    }
}
