//! Namespace prefix bindings: expansion for queries, compaction for labels.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::term::Node;
use crate::vocab::DEFAULT_PREFIXES;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    bindings: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for (prefix, ns) in DEFAULT_PREFIXES {
            map.bind(*prefix, *ns);
        }
        map
    }

    /// Later bindings of the same prefix replace earlier ones.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.bindings.insert(prefix.into(), namespace.into());
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    pub fn expand(&self, prefix: &str, local: &str) -> Option<String> {
        self.namespace(prefix).map(|ns| format!("{ns}{local}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn extend(&mut self, other: &PrefixMap) {
        for (prefix, ns) in other.iter() {
            self.bind(prefix, ns);
        }
    }

    /// Compact an IRI to `prefix:local` using the longest matching namespace.
    ///
    /// Returns `None` when no namespace matches or the remainder is not a
    /// plain local name.
    pub fn qname(&self, iri: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in self.iter() {
            if ns.is_empty() || !iri.starts_with(ns) {
                continue;
            }
            let local = &iri[ns.len()..];
            if local.is_empty() || !local.chars().all(is_local_char) {
                continue;
            }
            match best {
                Some((_, best_ns)) if best_ns.len() >= ns.len() => {}
                _ => best = Some((prefix, ns)),
            }
        }
        best.map(|(prefix, ns)| format!("{prefix}:{}", &iri[ns.len()..]))
    }

    /// Display form of a node: qname when possible, otherwise the full IRI;
    /// blank nodes render as `_:id`.
    pub fn compact(&self, node: &Node) -> String {
        match node {
            Node::Iri(iri) => self.qname(iri).unwrap_or_else(|| iri.clone()),
            Node::BlankNode(_) => node.to_string(),
        }
    }

    /// Harvest `@prefix` / `PREFIX` declarations from Turtle-family source text.
    ///
    /// Text inside string literals and comments is never read as a
    /// declaration.
    pub fn harvest_turtle(&mut self, text: &str) -> usize {
        let text = blank_literals_and_comments(text);
        static PREFIX_DECL: OnceLock<Regex> = OnceLock::new();
        let re = PREFIX_DECL.get_or_init(|| {
            Regex::new(r"(?mi)^\s*@?prefix\s+([A-Za-z][\w.\-]*)?:\s*<([^>]*)>")
                .expect("static prefix regex")
        });
        let mut count = 0;
        for caps in re.captures_iter(&text) {
            let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let ns = &caps[2];
            self.bind(prefix, ns);
            count += 1;
        }
        count
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Iri,
    Comment,
    Str { quote: char, long: bool },
}

/// Replace string literal and comment text with spaces, keeping newlines so
/// line anchors still line up.
fn blank_literals_and_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut state = Scan::Code;
    let mut i = 0;
    let blank = |c: char| if c == '\n' { '\n' } else { ' ' };
    while i < chars.len() {
        let c = chars[i];
        match state {
            Scan::Code => {
                match c {
                    '<' => state = Scan::Iri,
                    '#' => state = Scan::Comment,
                    '"' | '\'' => {
                        let long = chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c);
                        state = Scan::Str { quote: c, long };
                        if long {
                            out.push_str("   ");
                            i += 3;
                            continue;
                        }
                        out.push(' ');
                        i += 1;
                        continue;
                    }
                    _ => {}
                }
                out.push(if state == Scan::Comment { ' ' } else { c });
            }
            Scan::Iri => {
                if c == '>' {
                    state = Scan::Code;
                }
                out.push(c);
            }
            Scan::Comment => {
                if c == '\n' {
                    state = Scan::Code;
                }
                out.push(blank(c));
            }
            Scan::Str { quote, long } => {
                if c == '\\' {
                    out.push(' ');
                    if let Some(&next) = chars.get(i + 1) {
                        out.push(blank(next));
                    }
                    i += 2;
                    continue;
                }
                let closes = c == quote
                    && (!long || (chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote)));
                if closes {
                    state = Scan::Code;
                    let width = if long { 3 } else { 1 };
                    out.push_str(&" ".repeat(width));
                    i += width;
                    continue;
                }
                out.push(blank(c));
            }
        }
        i += 1;
    }
    out
}

fn is_local_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}
