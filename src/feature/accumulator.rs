//! Require/remove accumulation over the levels of one API stream.
//!
//! A feature level only lists what changed since the previous level of its
//! stream, so the membership of `GL_VERSION_3_3` is every require and remove
//! from `GL_VERSION_1_0` through `GL_VERSION_3_3`, applied in document order.
//! The running sets live in a [`FeatureAccumulator`] owned by a single
//! resolution; nothing survives between calls.

use rustc_hash::FxHashSet;

use crate::base::{EntityKind, Name, RegistryError, Result};
use crate::registry::{EntityStore, FeatureAction, FeatureLevel};

// ============================================================================
// FEATURE
// ============================================================================

/// The frozen membership of one feature level.
///
/// Each name list is sorted and free of duplicates; that order is what every
/// downstream artifact uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    pub name: Name,
    pub api: Name,
    types: Vec<Name>,
    constants: Vec<Name>,
    functions: Vec<Name>,
}

impl Feature {
    /// Build a feature from arbitrary name collections, sorting and deduplicating them.
    pub fn new(
        name: impl Into<Name>,
        api: impl Into<Name>,
        types: impl IntoIterator<Item = Name>,
        constants: impl IntoIterator<Item = Name>,
        functions: impl IntoIterator<Item = Name>,
    ) -> Self {
        Self {
            name: name.into(),
            api: api.into(),
            types: freeze(types),
            constants: freeze(constants),
            functions: freeze(functions),
        }
    }

    pub fn types(&self) -> &[Name] {
        &self.types
    }

    pub fn constants(&self) -> &[Name] {
        &self.constants
    }

    pub fn functions(&self) -> &[Name] {
        &self.functions
    }

    /// Names of the given kind.
    pub fn names(&self, kind: EntityKind) -> &[Name] {
        match kind {
            EntityKind::Type => &self.types,
            EntityKind::Constant => &self.constants,
            EntityKind::Function => &self.functions,
        }
    }

    /// Whether the feature requires `name` of the given kind.
    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        self.names(kind)
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .is_ok()
    }
}

fn freeze(names: impl IntoIterator<Item = Name>) -> Vec<Name> {
    let mut names: Vec<Name> = names.into_iter().collect();
    names.sort();
    names.dedup();
    names
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Running name sets for one API stream during one resolution.
#[derive(Clone, Debug, Default)]
pub struct FeatureAccumulator {
    types: FxHashSet<Name>,
    constants: FxHashSet<Name>,
    functions: FxHashSet<Name>,
}

impl FeatureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, kind: EntityKind) -> &mut FxHashSet<Name> {
        match kind {
            EntityKind::Type => &mut self.types,
            EntityKind::Constant => &mut self.constants,
            EntityKind::Function => &mut self.functions,
        }
    }

    /// Whether `name` is currently required.
    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        match kind {
            EntityKind::Type => self.types.contains(name),
            EntityKind::Constant => self.constants.contains(name),
            EntityKind::Function => self.functions.contains(name),
        }
    }

    /// Apply every operation of one level, in order.
    ///
    /// A remove of a name that is not currently required is a
    /// [`RegistryError::Consistency`] error.
    pub fn apply(mut self, level: &FeatureLevel) -> Result<Self> {
        for op in &level.operations {
            match op.action {
                FeatureAction::Require => {
                    self.set_mut(op.kind).insert(op.name.clone());
                }
                FeatureAction::Remove => {
                    if !self.set_mut(op.kind).remove(&op.name) {
                        return Err(RegistryError::Consistency {
                            kind: op.kind,
                            name: op.name.clone(),
                            feature: level.name.clone(),
                        });
                    }
                }
            }
        }
        tracing::trace!(
            feature = %level.name,
            types = self.types.len(),
            constants = self.constants.len(),
            functions = self.functions.len(),
            "Folded feature level"
        );
        Ok(self)
    }

    /// Sort the running sets and freeze them into a [`Feature`].
    pub fn finish(self, name: impl Into<Name>, api: impl Into<Name>) -> Feature {
        Feature::new(name, api, self.types, self.constants, self.functions)
    }
}

/// Fold `levels` in order and freeze the result under the last level's name.
///
/// `levels` must be non-empty and belong to a single API stream.
pub fn accumulate(levels: &[FeatureLevel]) -> Result<Feature> {
    let target = levels
        .last()
        .ok_or_else(|| RegistryError::unknown_feature(""))?;
    let accumulator = levels
        .iter()
        .try_fold(FeatureAccumulator::new(), |acc, level| acc.apply(level))?;
    Ok(accumulator.finish(target.name.clone(), target.api.clone()))
}

/// Resolve the membership of the feature level named `name`.
///
/// Every constant and function the feature requires must exist in the
/// store. Required type names are checked by the type resolver.
pub fn resolve_feature(store: &EntityStore, name: &str) -> Result<Feature> {
    let feature = accumulate(store.levels_through(name)?)?;

    for constant in feature.constants() {
        if store.constant(constant).is_none() {
            return Err(unknown_entity(EntityKind::Constant, constant, &feature));
        }
    }
    for function in feature.functions() {
        if store.function(function).is_none() {
            return Err(unknown_entity(EntityKind::Function, function, &feature));
        }
    }

    tracing::debug!(
        feature = %feature.name,
        api = %feature.api,
        types = feature.types().len(),
        constants = feature.constants().len(),
        functions = feature.functions().len(),
        "Resolved feature"
    );
    Ok(feature)
}

fn unknown_entity(kind: EntityKind, name: &Name, feature: &Feature) -> RegistryError {
    RegistryError::UnknownEntity {
        kind,
        name: name.clone(),
        feature: feature.name.clone(),
    }
}

/// Every feature level name across every API stream, sorted by name.
pub fn list_features(store: &EntityStore) -> Vec<Name> {
    store.feature_names()
}
