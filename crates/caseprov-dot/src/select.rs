//! Combining the ancestry and influence reductions into the display set.

use std::collections::BTreeSet;

use caseprov_rdf::Node;
use serde::Serialize;

use crate::classify::empty_collection;

/// The outcome of one reduction phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Closure {
    /// The phase was not requested; it keeps everything.
    Unrestricted,
    Restricted(BTreeSet<Node>),
}

impl Closure {
    pub fn is_restricted(&self) -> bool {
        matches!(self, Closure::Restricted(_))
    }

    /// `Unrestricted` is the identity of intersection.
    pub fn intersect(&self, other: &Closure) -> Closure {
        match (self, other) {
            (Closure::Unrestricted, Closure::Unrestricted) => Closure::Unrestricted,
            (Closure::Unrestricted, Closure::Restricted(set))
            | (Closure::Restricted(set), Closure::Unrestricted) => Closure::Restricted(set.clone()),
            (Closure::Restricted(a), Closure::Restricted(b)) => {
                Closure::Restricted(a.intersection(b).cloned().collect())
            }
        }
    }
}

/// The nodes to draw.
///
/// With neither phase restricting, this is the whole classified universe.
/// Otherwise it is the intersection of both phases, kept within the
/// universe. `prov:EmptyCollection` is dropped last when `omit_empty` is set.
pub fn select_display_set(
    ancestry: &Closure,
    influence: &Closure,
    universe: &BTreeSet<Node>,
    omit_empty: bool,
) -> BTreeSet<Node> {
    let mut display = if !ancestry.is_restricted() && !influence.is_restricted() {
        universe.clone()
    } else {
        match ancestry.intersect(influence) {
            Closure::Restricted(set) => set.intersection(universe).cloned().collect(),
            Closure::Unrestricted => universe.clone(),
        }
    };
    if omit_empty {
        display.remove(&empty_collection());
    }
    display
}
