//! Error types for ingestion and resolution.

use thiserror::Error;

use super::{EntityKind, Name};

/// Result alias used across the crate.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Errors raised while ingesting a registry or resolving a feature.
///
/// Every variant is terminal: a run that hits one stops and reports the
/// offending names.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while reading the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A structurally invalid entry in the document.
    #[error("Malformed {element}: {message}")]
    MalformedEntity {
        element: &'static str,
        message: String,
    },

    /// A feature references a name that was never ingested.
    #[error("Unknown {kind} '{name}' referenced by feature '{feature}'")]
    UnknownEntity {
        kind: EntityKind,
        name: Name,
        feature: Name,
    },

    /// A remove without a matching prior require.
    #[error("Feature '{feature}' removes {kind} '{name}' which is not currently required")]
    Consistency {
        kind: EntityKind,
        name: Name,
        feature: Name,
    },

    /// A referenced type name has no stored definition.
    #[error("No definition for type '{0}'")]
    MissingType(Name),

    /// The caller asked for a feature level the registry does not define.
    #[error("Unknown feature '{0}'")]
    UnknownFeature(Name),
}

impl RegistryError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a malformed entity error for the given element tag.
    pub fn malformed(element: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedEntity {
            element,
            message: message.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(element: &'static str, attribute: &str) -> Self {
        Self::malformed(element, format!("missing required attribute '{attribute}'"))
    }

    /// Create a missing child marker error.
    pub fn missing_marker(element: &'static str, marker: &str, context: impl AsRef<str>) -> Self {
        Self::malformed(
            element,
            format!("missing <{marker}> marker in {}", context.as_ref()),
        )
    }

    /// Create an unknown feature error.
    pub fn unknown_feature(name: impl Into<Name>) -> Self {
        Self::UnknownFeature(name.into())
    }

    /// Create a missing type error.
    pub fn missing_type(name: impl Into<Name>) -> Self {
        Self::MissingType(name.into())
    }
}
