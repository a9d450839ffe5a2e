//! # glsys-base
//!
//! API registry ingestion, feature-level resolution and function loader
//! generation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! emit      → Header and loader module rendering
//!   ↓
//! resolve   → Type closure, closest-match selection, linked/loaded partition
//!   ↓
//! feature   → Require/remove accumulation into frozen feature name sets
//!   ↓
//! registry  → XML element tree, ingestion, EntityStore
//!   ↓
//! base      → Primitives (Name, EntityKind, RegistryError)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use glsys::emit::{EmissionPayload, EmitOptions, render_header};
//! use glsys::resolve::{ResolveOptions, ResolvedFeature};
//!
//! let store = glsys::registry::ingest_path(Path::new("gl.xml"))?;
//! let resolved = ResolvedFeature::resolve(&store, "GL_VERSION_3_3", Some("GL_VERSION_1_1"), &ResolveOptions::default())?;
//! let payload = EmissionPayload::build(&store, &resolved)?;
//! let header = render_header(&payload, &EmitOptions::default());
//! ```

// ============================================================================
// MODULES (dependency order: base → registry → feature → resolve → emit)
// ============================================================================

/// Foundation types: Name, EntityKind, RegistryError
pub mod base;

/// Registry: XML element tree, ingestion, EntityStore
pub mod registry;

/// Feature levels: require/remove accumulation
pub mod feature;

/// Resolution: type closure and function partition
pub mod resolve;

/// Artifact writer: header and loader module
pub mod emit;

// Re-export foundation types
pub use base::{EntityKind, Name, RegistryError, Result};

// Re-export the core operations
pub use feature::{Feature, list_features, resolve_feature};
pub use registry::{EntityStore, TypeDefinition, ingest, ingest_path, ingest_str};
pub use resolve::{Partition, ResolvedFeature, partition, resolve_types};
