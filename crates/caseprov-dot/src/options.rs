use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProvDotError, Result};

/// Terminal query files are read up to this many bytes.
pub const MAX_TERMINAL_QUERY_BYTES: u64 = 1 << 22;

pub const DEFAULT_WRAP_WIDTH: usize = 60;

/// Relation categories the caller asked to display.
///
/// Requesting any of them reduces the render to that chain of influence;
/// requesting none displays every category unreduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeCategories {
    /// Activities and `wasInformedBy`.
    pub activity_informing: bool,
    /// Agents and `actedOnBehalfOf`.
    pub agent_delegating: bool,
    /// Entities and `wasDerivedFrom`.
    pub entity_deriving: bool,
}

impl IncludeCategories {
    pub fn all() -> Self {
        Self {
            activity_informing: true,
            agent_delegating: true,
            entity_deriving: true,
        }
    }

    pub fn any(&self) -> bool {
        self.activity_informing || self.agent_delegating || self.entity_deriving
    }

    /// What actually gets discovered: everything when nothing was requested.
    pub fn effective(&self) -> Self {
        if self.any() {
            *self
        } else {
            Self::all()
        }
    }
}

/// Where the chain of ancestry is rooted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TerminalSelector {
    /// No ancestry reduction.
    #[default]
    None,
    /// A single terminal node.
    Iri(String),
    /// A `SELECT` query whose every bound value is a terminal IRI.
    QueryText(String),
    /// Root the ancestry at `prov:EmptyCollection`.
    EmptyCollection,
}

impl TerminalSelector {
    /// Read a terminal query from a file.
    pub fn query_file(path: &Path) -> Result<Self> {
        let io_err = |source| ProvDotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(io_err)?;
        let mut text = String::new();
        file.take(MAX_TERMINAL_QUERY_BYTES)
            .read_to_string(&mut text)
            .map_err(io_err)?;
        Ok(Self::QueryText(text))
    }

    pub fn is_restricting(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub include: IncludeCategories,
    /// Draw unqualified relations dashed, and solid where a qualified
    /// influence backs them.
    pub dash_unqualified: bool,
    pub terminal: TerminalSelector,
    pub omit_empty_collection: bool,
    /// Column at which label text blocks wrap.
    pub wrap_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include: IncludeCategories::default(),
            dash_unqualified: false,
            terminal: TerminalSelector::None,
            omit_empty_collection: false,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}
