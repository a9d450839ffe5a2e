//! Type dependency resolution.
//!
//! Given a feature, collect the type names it needs (explicit requires plus
//! every prefixed token in its function signatures), pick one definition per
//! name with the closest-match policy, add the direct prerequisite of each
//! pick, and order the union by document position.
//!
//! Prerequisites are expanded exactly one level: the prerequisite of a
//! prerequisite is not followed. Registries rely on this shallow shape.

use std::collections::{BTreeMap, BTreeSet};

use crate::base::{EntityKind, Name, RegistryError, Result};
use crate::feature::Feature;
use crate::registry::{EntityStore, FunctionSignature, TypeDefinition};

/// Options for type resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Tokens in function signatures starting with this prefix are type references.
    pub type_prefix: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            type_prefix: "GL".to_string(),
        }
    }
}

/// Pick the definition for `api` among same-named variants.
///
/// The first definition tagged with exactly `api` wins; otherwise the
/// first-registered definition. `None` only for an empty slice.
pub fn closest_match<'s>(definitions: &'s [TypeDefinition], api: &str) -> Option<&'s TypeDefinition> {
    definitions
        .iter()
        .find(|def| def.matches_api(api))
        .or_else(|| definitions.first())
}

/// Resolves the ordered type definitions a feature must declare.
#[derive(Debug, Clone)]
pub struct TypeResolver<'s> {
    store: &'s EntityStore,
    options: ResolveOptions,
}

impl<'s> TypeResolver<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self::with_options(store, ResolveOptions::default())
    }

    pub fn with_options(store: &'s EntityStore, options: ResolveOptions) -> Self {
        Self { store, options }
    }

    /// Closest-match selection for one type name.
    pub fn select(&self, api: &str, name: &str) -> Result<&'s TypeDefinition> {
        closest_match(self.store.type_definitions(name), api)
            .ok_or_else(|| RegistryError::missing_type(name))
    }

    /// Prefixed type names mentioned in a signature, `*` stripped.
    pub fn referenced_types<'a>(
        &'a self,
        signature: &'a FunctionSignature,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = self.options.type_prefix.as_str();
        signature
            .type_texts()
            .flat_map(str::split_whitespace)
            .filter(move |token| token.starts_with(prefix))
            .filter_map(|token| token.split('*').next())
            .filter(|name| !name.is_empty())
    }

    /// Every type name the feature needs before prerequisites are added.
    pub fn needed_type_names(&self, feature: &Feature) -> Result<BTreeSet<Name>> {
        let mut needed: BTreeSet<Name> = feature.types().iter().cloned().collect();

        for function_name in feature.functions() {
            let signature = self.store.function(function_name).ok_or_else(|| {
                RegistryError::UnknownEntity {
                    kind: EntityKind::Function,
                    name: function_name.clone(),
                    feature: feature.name.clone(),
                }
            })?;
            needed.extend(self.referenced_types(signature).map(Name::new));
        }
        Ok(needed)
    }

    /// The closed, deduplicated type list ordered by document position.
    pub fn resolve(&self, feature: &Feature) -> Result<Vec<&'s TypeDefinition>> {
        let api = feature.api.as_str();
        let mut selected: BTreeMap<u32, &'s TypeDefinition> = BTreeMap::new();
        let mut prerequisites: BTreeSet<&'s str> = BTreeSet::new();

        for name in self.needed_type_names(feature)? {
            let definition = self.select(api, &name)?;
            tracing::trace!("Selected {definition} for {name}");
            selected.insert(definition.sort_key, definition);
            if let Some(requires) = definition.requires.as_deref() {
                prerequisites.insert(requires);
            }
        }

        for name in prerequisites {
            let definition = self.select(api, name)?;
            if selected.insert(definition.sort_key, definition).is_none() {
                tracing::trace!("Added prerequisite {definition}");
            }
        }

        tracing::debug!(
            feature = %feature.name,
            types = selected.len(),
            "Resolved type closure"
        );
        Ok(selected.into_values().collect())
    }
}

/// Resolve a feature's types with the default options.
pub fn resolve_types<'s>(store: &'s EntityStore, feature: &Feature) -> Result<Vec<&'s TypeDefinition>> {
    TypeResolver::new(store).resolve(feature)
}
