//! Entity definitions held by the [`EntityStore`](super::EntityStore).
//!
//! ```text
//! TypeDefinition      name + verbatim declaration, optional api tag / prerequisite
//! ConstantDefinition  name + optional group + optional value
//! FunctionSignature   name + return type + ordered parameters
//! FeatureLevel        name + api + ordered require/remove operations
//! ```

use std::fmt;

use crate::base::{EntityKind, Name};

// ============================================================================
// TYPES
// ============================================================================

/// One declaration of a platform type.
///
/// Several definitions may share a name when the registry provides
/// API-specific variants; the store keeps them in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Declared type name.
    pub name: Name,
    /// Declaration text, emitted verbatim.
    pub definition: String,
    /// API variant tag. `None` is the default definition.
    pub api: Option<Name>,
    /// Name of a type that must be declared before this one.
    pub requires: Option<Name>,
    /// Position among all type entries in the document.
    pub sort_key: u32,
}

impl TypeDefinition {
    /// Whether this definition is tagged for exactly `api`.
    pub fn matches_api(&self, api: &str) -> bool {
        self.api.as_deref() == Some(api)
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flat = self.definition.lines().collect::<Vec<_>>().join(" ");
        let shown: String = flat.chars().take(32).collect();
        let ellipsis = if flat.chars().count() > 32 { "..." } else { "" };
        write!(
            f,
            "TypeDefinition({}, \"{shown}{ellipsis}\", api={}, requires={})",
            self.name,
            self.api.as_deref().unwrap_or("default"),
            self.requires.as_deref().unwrap_or("none"),
        )
    }
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// A named constant ("enum" in the registry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantDefinition {
    pub name: Name,
    /// Classification group, if any.
    pub group: Option<Name>,
    /// Literal value. `None` while only seen through a group listing.
    pub value: Option<String>,
}

// ============================================================================
// FUNCTIONS
// ============================================================================

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: Name,
    /// C type text, e.g. `const GLchar *`.
    pub ty: String,
}

/// A function signature ("command" in the registry).
///
/// Parameter order is the declaration order and defines the call ABI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: Name,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
}

impl FunctionSignature {
    /// Parameters rendered as `TYPE NAME, TYPE NAME`.
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Direct declaration: `RET NAME(PARAMS);`.
    pub fn declaration(&self) -> String {
        format!("{} {}({});", self.return_type, self.name, self.parameter_list())
    }

    /// Name of the function-pointer type for this function.
    pub fn pointer_type_name(&self) -> String {
        format!("PFN{}PROC", self.name.to_uppercase())
    }

    /// Function-pointer typedef: `typedef RET (* PFNNAMEPROC)(PARAMS);`.
    pub fn pointer_typedef(&self) -> String {
        format!(
            "typedef {} (* {})({});",
            self.return_type,
            self.pointer_type_name(),
            self.parameter_list()
        )
    }

    /// Every type text this signature mentions, return type first.
    pub fn type_texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.return_type.as_str())
            .chain(self.parameters.iter().map(|p| p.ty.as_str()))
    }
}

// ============================================================================
// FEATURE LEVELS
// ============================================================================

/// Whether an operation adds or removes names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureAction {
    Require,
    Remove,
}

impl FeatureAction {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "require" => Some(FeatureAction::Require),
            "remove" => Some(FeatureAction::Remove),
            _ => None,
        }
    }
}

/// A single require or remove of one named entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureOperation {
    pub action: FeatureAction,
    pub kind: EntityKind,
    pub name: Name,
}

/// One versioned feature level as written in the registry.
///
/// Levels are incremental: the membership of a level is the fold of every
/// level of the same API stream up to and including it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureLevel {
    pub name: Name,
    pub api: Name,
    /// Version number attribute, e.g. `3.3`.
    pub number: Option<String>,
    pub operations: Vec<FeatureOperation>,
}
