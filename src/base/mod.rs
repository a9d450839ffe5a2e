//! Foundation types shared by every layer.
//!
//! - [`Name`] - Cheap-to-clone entity and feature names
//! - [`EntityKind`] - The three kinds of registry entity
//! - [`RegistryError`] - The error taxonomy for ingestion and resolution
//!
//! This module has NO dependencies on other glsys modules.

mod error;
mod kind;

pub use error::{RegistryError, Result};
pub use kind::EntityKind;

/// Name of a type, constant, function or feature level.
pub type Name = smol_str::SmolStr;
