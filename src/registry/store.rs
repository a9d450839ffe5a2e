//! The entity store built by ingestion.
//!
//! ```text
//! EntityStore
//! ├── types:      IndexMap<Name, Vec<TypeDefinition>>   (variants in document order)
//! ├── constants:  IndexMap<Name, ConstantDefinition>
//! ├── functions:  IndexMap<Name, FunctionSignature>
//! └── streams:    IndexMap<api, Vec<FeatureLevel>>      (levels in document order)
//! ```
//!
//! The store is only mutated by ingestion and is read-only afterwards;
//! every resolution borrows it immutably.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::model::{ConstantDefinition, FeatureLevel, FunctionSignature, TypeDefinition};
use crate::base::{Name, RegistryError, Result};

/// Every type, constant, function and feature level of one registry document.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    header_comment: Option<String>,
    types: IndexMap<Name, Vec<TypeDefinition>>,
    constants: IndexMap<Name, ConstantDefinition>,
    functions: IndexMap<Name, FunctionSignature>,
    streams: IndexMap<Name, Vec<FeatureLevel>>,
    /// Feature name -> (api stream, index within the stream).
    feature_index: FxHashMap<Name, (Name, usize)>,
    next_sort_key: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// The registry's leading comment (usually its copyright notice).
    pub fn header_comment(&self) -> Option<&str> {
        self.header_comment.as_deref()
    }

    /// All definitions stored under `name`, in document order.
    pub fn type_definitions(&self, name: &str) -> &[TypeDefinition] {
        self.types.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantDefinition> {
        self.constants.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    /// Look up a feature level by name.
    pub fn feature_level(&self, name: &str) -> Option<&FeatureLevel> {
        let (api, index) = self.feature_index.get(name)?;
        self.streams.get(api.as_str())?.get(*index)
    }

    /// Levels of `name`'s API stream from the first up to and including `name`.
    pub fn levels_through(&self, name: &str) -> Result<&[FeatureLevel]> {
        let (api, index) = self
            .feature_index
            .get(name)
            .ok_or_else(|| RegistryError::unknown_feature(name))?;
        let stream = self
            .streams
            .get(api.as_str())
            .ok_or_else(|| RegistryError::unknown_feature(name))?;
        Ok(&stream[..=*index])
    }

    /// The ordered feature levels of one API stream.
    pub fn stream(&self, api: &str) -> &[FeatureLevel] {
        self.streams.get(api).map(Vec::as_slice).unwrap_or(&[])
    }

    /// API streams in the order they first appear.
    pub fn apis(&self) -> impl Iterator<Item = &Name> {
        self.streams.keys()
    }

    /// Every feature level name across every API stream, sorted by name.
    pub fn feature_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.feature_index.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn type_count(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_index.len()
    }

    // ------------------------------------------------------------------------
    // Population (ingestion only)
    // ------------------------------------------------------------------------

    pub(crate) fn set_header_comment(&mut self, comment: String) {
        self.header_comment = Some(comment);
    }

    /// Hand out the next document-order key for a type entry.
    pub(crate) fn next_sort_key(&mut self) -> u32 {
        let key = self.next_sort_key;
        self.next_sort_key += 1;
        key
    }

    pub(crate) fn push_type(&mut self, definition: TypeDefinition) {
        self.types
            .entry(definition.name.clone())
            .or_default()
            .push(definition);
    }

    /// Register a constant through a group listing.
    ///
    /// A value already known for the name is kept; the group is replaced.
    pub(crate) fn seed_constant(&mut self, name: Name, group: Name) {
        match self.constants.get_mut(&name) {
            Some(existing) => existing.group = Some(group),
            None => {
                self.constants.insert(
                    name.clone(),
                    ConstantDefinition {
                        name,
                        group: Some(group),
                        value: None,
                    },
                );
            }
        }
    }

    /// Define a constant's value. The last value ingested for a name wins.
    pub(crate) fn define_constant(&mut self, name: Name, group: Option<Name>, value: String) {
        match self.constants.get_mut(&name) {
            Some(existing) => existing.value = Some(value),
            None => {
                self.constants.insert(
                    name.clone(),
                    ConstantDefinition {
                        name,
                        group,
                        value: Some(value),
                    },
                );
            }
        }
    }

    pub(crate) fn insert_function(&mut self, signature: FunctionSignature) {
        if self.functions.contains_key(&signature.name) {
            tracing::warn!("Function '{}' defined twice; keeping the later definition", signature.name);
        }
        self.functions.insert(signature.name.clone(), signature);
    }

    pub(crate) fn push_feature_level(&mut self, level: FeatureLevel) -> Result<()> {
        if self.feature_index.contains_key(&level.name) {
            return Err(RegistryError::malformed(
                "feature",
                format!("duplicate feature name '{}'", level.name),
            ));
        }
        let stream = self.streams.entry(level.api.clone()).or_default();
        self.feature_index
            .insert(level.name.clone(), (level.api.clone(), stream.len()));
        stream.push(level);
        Ok(())
    }
}
