//! Graphviz attributes for PROV nodes and relations.
//!
//! Colors and shapes follow the PROV-O overview diagram: yellow ovals for
//! entities, blue boxes for activities, orange houses for agents.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::edges::RelationKind;

/// Attribute name → value, emitted in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleAttrs {
    attrs: BTreeMap<String, String>,
}

impl StyleAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.attrs.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Which base look a rendered node gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeStyle {
    Activity,
    Agent,
    Entity,
    Collection,
}

pub fn node_style(kind: NodeStyle) -> StyleAttrs {
    match kind {
        NodeStyle::Entity => StyleAttrs::new()
            .with("shape", "oval")
            .with("style", "filled")
            .with("fillcolor", "khaki1")
            .with("color", "#808080"),
        NodeStyle::Collection => node_style(NodeStyle::Entity)
            .with("shape", "folder")
            .with("fillcolor", "khaki3"),
        NodeStyle::Activity => StyleAttrs::new()
            .with("shape", "box")
            .with("style", "filled")
            .with("fillcolor", "#9FB1FC")
            .with("color", "#0000FF"),
        NodeStyle::Agent => StyleAttrs::new()
            .with("shape", "house")
            .with("style", "filled")
            .with("fillcolor", "#FED37F"),
    }
}

pub fn relation_style(kind: RelationKind) -> StyleAttrs {
    let base = StyleAttrs::new()
        .with("label", kind.short_name())
        .with("fontsize", "10.0");
    match kind {
        RelationKind::WasGeneratedBy => base
            .with("color", "darkgreen")
            .with("fontcolor", "darkgreen"),
        RelationKind::Used => base.with("color", "red4").with("fontcolor", "red"),
        RelationKind::WasAttributedTo
        | RelationKind::WasAssociatedWith
        | RelationKind::ActedOnBehalfOf => base.with("color", "#FED37F"),
        RelationKind::WasInformedBy => base.with("color", "blue3"),
        RelationKind::HadMember | RelationKind::WasDerivedFrom => base,
    }
}

/// Style of the shorthand form of a relation.
pub fn unqualified_style(kind: RelationKind, dash_unqualified: bool) -> StyleAttrs {
    let style = relation_style(kind);
    if dash_unqualified {
        style.with("style", "dashed")
    } else {
        style
    }
}

pub fn invisible_edge_style() -> StyleAttrs {
    StyleAttrs::new().with("style", "invis")
}
