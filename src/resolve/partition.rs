//! Split of a feature's functions into linked and loaded sets.

use crate::base::{EntityKind, Name};
use crate::feature::Feature;

/// Functions of a target feature split by how the caller reaches them.
///
/// `linked` are also in the library feature and are declared as plain
/// external symbols; `loaded` are resolved at runtime through pointer
/// slots. Both keep the target feature's sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub linked: Vec<Name>,
    pub loaded: Vec<Name>,
}

impl Partition {
    pub fn is_fully_loaded(&self) -> bool {
        self.linked.is_empty()
    }
}

/// Partition `target`'s functions against an optional library feature.
pub fn partition(target: &Feature, library: Option<&Feature>) -> Partition {
    let (linked, loaded) = target.functions().iter().cloned().partition(|name| {
        library.is_some_and(|lib| lib.contains(EntityKind::Function, name))
    });
    Partition { linked, loaded }
}
