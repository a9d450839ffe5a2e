//! The ordered payload both artifacts are rendered from.

use crate::base::{EntityKind, Name, RegistryError, Result};
use crate::registry::{EntityStore, FunctionSignature, TypeDefinition};
use crate::resolve::ResolvedFeature;

/// A function reached through a runtime-resolved pointer slot.
#[derive(Clone, Debug)]
pub struct LoadedFunction<'s> {
    pub signature: &'s FunctionSignature,
    /// `PFN<NAME>PROC`
    pub pointer_type: String,
}

/// Everything the header and loader module print, in print order.
///
/// Rendering both artifacts from one payload keeps their loaded function
/// lists and pointer type names identical.
#[derive(Clone, Debug)]
pub struct EmissionPayload<'s> {
    pub feature: Name,
    /// Major and minor components of the feature name, if it has them.
    pub version: Option<(&'s str, &'s str)>,
    pub library: Option<Name>,
    pub header_comment: Option<&'s str>,
    /// Every feature known to the registry, sorted by name.
    pub known_features: Vec<Name>,
    pub types: Vec<&'s TypeDefinition>,
    /// Constant name and value pairs, sorted by name.
    pub constants: Vec<(&'s str, &'s str)>,
    pub linked: Vec<&'s FunctionSignature>,
    pub loaded: Vec<LoadedFunction<'s>>,
}

impl<'s> EmissionPayload<'s> {
    /// Collect the payload for a resolved feature.
    ///
    /// Fails with [`RegistryError::UnknownEntity`] when a required constant
    /// has no value or a function is missing from the store.
    pub fn build(store: &'s EntityStore, resolved: &ResolvedFeature<'s>) -> Result<Self> {
        let feature = &resolved.feature;
        let unknown = |kind: EntityKind, name: &Name| RegistryError::UnknownEntity {
            kind,
            name: name.clone(),
            feature: feature.name.clone(),
        };

        let mut constants = Vec::with_capacity(feature.constants().len());
        for name in feature.constants() {
            let constant = store
                .constant(name)
                .ok_or_else(|| unknown(EntityKind::Constant, name))?;
            let value = constant
                .value
                .as_deref()
                .ok_or_else(|| unknown(EntityKind::Constant, name))?;
            constants.push((constant.name.as_str(), value));
        }

        let signature = |name: &Name| {
            store
                .function(name)
                .ok_or_else(|| unknown(EntityKind::Function, name))
        };
        let linked = resolved
            .partition
            .linked
            .iter()
            .map(&signature)
            .collect::<Result<Vec<_>>>()?;
        let loaded = resolved
            .partition
            .loaded
            .iter()
            .map(|name| {
                signature(name).map(|sig| LoadedFunction {
                    signature: sig,
                    pointer_type: sig.pointer_type_name(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let version = store
            .feature_level(&feature.name)
            .and_then(|level| split_version(&level.name));

        Ok(Self {
            feature: feature.name.clone(),
            version,
            library: resolved.library.clone(),
            header_comment: store.header_comment(),
            known_features: store.feature_names(),
            types: resolved.types.clone(),
            constants,
            linked,
            loaded,
        })
    }
}

/// The last two `_`-separated components of a feature name.
pub fn split_version(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.rsplit('_');
    let minor = parts.next()?;
    let major = parts.next()?;
    Some((major, minor))
}
