//! Type closure and function partitioning for a resolved feature.
//!
//! ```text
//! Feature ──▶ TypeResolver ──▶ Vec<&TypeDefinition>  (document order)
//!    │
//!    └──────▶ partition ─────▶ Partition { linked, loaded }
//! ```

mod partition;
mod types;

pub use partition::{Partition, partition};
pub use types::{ResolveOptions, TypeResolver, closest_match, resolve_types};

use crate::base::{Name, Result};
use crate::feature::{Feature, resolve_feature};
use crate::registry::{EntityStore, TypeDefinition};

/// A feature together with everything needed to emit it.
///
/// Type definitions are borrowed from the store.
#[derive(Clone, Debug)]
pub struct ResolvedFeature<'s> {
    pub feature: Feature,
    /// Name of the library feature the partition was computed against.
    pub library: Option<Name>,
    pub types: Vec<&'s TypeDefinition>,
    pub partition: Partition,
}

impl<'s> ResolvedFeature<'s> {
    /// Resolve `name`, optionally against the library feature `library`.
    pub fn resolve(
        store: &'s EntityStore,
        name: &str,
        library: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<Self> {
        let feature = resolve_feature(store, name)?;
        let library_feature = library
            .map(|lib| resolve_feature(store, lib))
            .transpose()?;

        let types = TypeResolver::with_options(store, options.clone()).resolve(&feature)?;
        let partition = partition(&feature, library_feature.as_ref());

        tracing::debug!(
            feature = %feature.name,
            linked = partition.linked.len(),
            loaded = partition.loaded.len(),
            "Partitioned functions"
        );
        Ok(Self {
            library: library_feature.map(|f| f.name),
            feature,
            types,
            partition,
        })
    }
}
