//! Registry ingestion and the entity store.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   parse_document   ┌──────────────┐   ingest   ┌──────────────┐
//! │ registry XML │ ─────────────────▶ │  XmlElement  │ ─────────▶ │ EntityStore  │
//! └──────────────┘                    └──────────────┘            └──────────────┘
//! ```
//!
//! The store owns every definition. Features and resolved output refer to
//! entities by name or borrow them from the store.
//!
//! ## Usage
//!
//! ```ignore
//! use glsys::registry;
//!
//! let store = registry::ingest_path(Path::new("gl.xml"))?;
//! for name in store.feature_names() {
//!     println!("{name}");
//! }
//! ```

mod document;
mod ingest;
pub mod model;
mod store;

pub use document::{XmlElement, parse_document};
pub use ingest::{ingest, ingest_path, ingest_str};
pub use model::{
    ConstantDefinition, FeatureAction, FeatureLevel, FeatureOperation, FunctionSignature,
    Parameter, TypeDefinition,
};
pub use store::EntityStore;
