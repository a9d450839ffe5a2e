//! Registry ingestion: one pass over the document into an [`EntityStore`].
//!
//! Top-level sections are dispatched by tag, in document order:
//!
//! | tag        | effect                                             |
//! |------------|----------------------------------------------------|
//! | `comment`  | header comment                                     |
//! | `types`    | type definitions (chunk or composite)              |
//! | `groups`   | constant names seeded with their group             |
//! | `enums`    | constant values                                    |
//! | `commands` | function signatures                                |
//! | `feature`  | one feature level with its require/remove lists    |
//!
//! Any other section is skipped.

use std::path::Path;

use super::document::{XmlElement, parse_document};
use super::model::{
    FeatureAction, FeatureLevel, FeatureOperation, FunctionSignature, Parameter, TypeDefinition,
};
use super::store::EntityStore;
use crate::base::{EntityKind, Name, RegistryError, Result};

/// Ingest a registry document from raw bytes.
pub fn ingest(input: &[u8]) -> Result<EntityStore> {
    let root = parse_document(input)?;
    let mut store = EntityStore::new();

    for section in &root.children {
        match section.tag.as_str() {
            "comment" => store.set_header_comment(section.text.clone()),
            "types" => ingest_types(&mut store, section)?,
            "groups" => ingest_groups(&mut store, section)?,
            "enums" => ingest_enums(&mut store, section)?,
            "commands" => ingest_commands(&mut store, section)?,
            "feature" => ingest_feature(&mut store, section)?,
            other => tracing::trace!("Skipping registry section <{other}>"),
        }
    }

    tracing::debug!(
        types = store.type_count(),
        constants = store.constant_count(),
        functions = store.function_count(),
        features = store.feature_count(),
        "Ingested registry"
    );
    Ok(store)
}

/// Ingest a registry document from a string.
pub fn ingest_str(input: &str) -> Result<EntityStore> {
    ingest(input.as_bytes())
}

/// Read and ingest a registry document from disk.
pub fn ingest_path(path: &Path) -> Result<EntityStore> {
    let bytes = std::fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    ingest(&bytes)
}

fn required_attr<'a>(element: &'a XmlElement, owner: &'static str, key: &str) -> Result<&'a str> {
    element
        .attr(key)
        .ok_or_else(|| RegistryError::missing_attribute(owner, key))
}

// ============================================================================
// TYPES
// ============================================================================

fn ingest_types(store: &mut EntityStore, types: &XmlElement) -> Result<()> {
    for entry in &types.children {
        if entry.tag != "type" {
            tracing::trace!("Skipping <{}> inside <types>", entry.tag);
            continue;
        }
        let sort_key = store.next_sort_key();
        let definition = match entry.attr("name") {
            Some(name) => chunk_type(entry, name, sort_key),
            None => composite_type(entry, sort_key)?,
        };
        store.push_type(definition);
    }
    Ok(())
}

/// A type whose name is an attribute and whose body is plain text.
fn chunk_type(entry: &XmlElement, name: &str, sort_key: u32) -> TypeDefinition {
    let mut definition = entry.text.clone();
    for child in &entry.children {
        definition.push_str(&child.text);
        definition.push_str(&child.tail);
    }
    TypeDefinition {
        name: Name::new(name),
        definition,
        api: entry.attr("api").map(Name::new),
        requires: entry.attr("requires").map(Name::new),
        sort_key,
    }
}

/// A type whose body interleaves text with a `<name>` marker and an
/// optional `<apientry/>` marker. Text and tails are joined in order.
fn composite_type(entry: &XmlElement, sort_key: u32) -> Result<TypeDefinition> {
    let mut definition = entry.text.clone();
    let mut name = None;

    for child in &entry.children {
        match child.tag.as_str() {
            // Entry-point macros are not emitted; only the trailing text is kept.
            "apientry" => {}
            "name" => name = Some(Name::new(&child.text)),
            other => {
                return Err(RegistryError::malformed(
                    "type",
                    format!("unexpected <{other}> in type definition '{}'", entry.text.trim()),
                ));
            }
        }
        definition.push_str(&child.text);
        definition.push_str(&child.tail);
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| RegistryError::missing_marker("type", "name", definition.trim()))?;

    Ok(TypeDefinition {
        name,
        definition,
        api: entry.attr("api").map(Name::new),
        requires: entry.attr("requires").map(Name::new),
        sort_key,
    })
}

// ============================================================================
// CONSTANTS
// ============================================================================

fn ingest_groups(store: &mut EntityStore, groups: &XmlElement) -> Result<()> {
    for group in &groups.children {
        if group.tag != "group" {
            return Err(RegistryError::malformed(
                "groups",
                format!("unexpected <{}> inside <groups>", group.tag),
            ));
        }
        let group_name = Name::new(required_attr(group, "group", "name")?);
        for member in group.children_named("enum") {
            let name = required_attr(member, "enum", "name")?;
            store.seed_constant(Name::new(name), group_name.clone());
        }
    }
    Ok(())
}

fn ingest_enums(store: &mut EntityStore, enums: &XmlElement) -> Result<()> {
    let group = enums.attr("group").map(Name::new);
    for entry in &enums.children {
        match entry.tag.as_str() {
            "unused" => continue,
            "enum" => {
                let name = required_attr(entry, "enum", "name")?;
                let value = required_attr(entry, "enum", "value")?;
                store.define_constant(Name::new(name), group.clone(), value.to_string());
            }
            other => {
                return Err(RegistryError::malformed(
                    "enums",
                    format!("unexpected <{other}> inside <enums>"),
                ));
            }
        }
    }
    Ok(())
}

// ============================================================================
// FUNCTIONS
// ============================================================================

fn ingest_commands(store: &mut EntityStore, commands: &XmlElement) -> Result<()> {
    for command in commands.children_named("command") {
        store.insert_function(function_signature(command)?);
    }
    Ok(())
}

fn function_signature(command: &XmlElement) -> Result<FunctionSignature> {
    let proto = command
        .child("proto")
        .ok_or_else(|| RegistryError::missing_marker("command", "proto", "<command>"))?;

    let name = marker_name(proto)
        .ok_or_else(|| RegistryError::missing_marker("command", "name", "<proto>"))?;

    let mut return_type = assemble_type(proto);
    if return_type.is_empty() {
        return_type = "void".to_string();
    }

    let mut parameters = Vec::new();
    for param in command.children_named("param") {
        let param_name = marker_name(param).ok_or_else(|| {
            RegistryError::missing_marker("command", "name", format!("<param> of '{name}'"))
        })?;
        parameters.push(Parameter {
            name: param_name,
            ty: assemble_type(param),
        });
    }

    Ok(FunctionSignature {
        name,
        return_type,
        parameters,
    })
}

fn marker_name(element: &XmlElement) -> Option<Name> {
    element
        .child("name")
        .map(|n| n.text.trim())
        .filter(|n| !n.is_empty())
        .map(Name::new)
}

/// Leading text, plus the `<ptype>` marker and its tail when present.
fn assemble_type(element: &XmlElement) -> String {
    let mut ty = element.text.clone();
    if let Some(ptype) = element.child("ptype") {
        ty.push_str(&ptype.text);
        ty.push_str(&ptype.tail);
    }
    ty.trim().to_string()
}

// ============================================================================
// FEATURES
// ============================================================================

fn ingest_feature(store: &mut EntityStore, feature: &XmlElement) -> Result<()> {
    let name = Name::new(required_attr(feature, "feature", "name")?);
    let api = Name::new(required_attr(feature, "feature", "api")?);

    let mut operations = Vec::new();
    for block in &feature.children {
        let action = FeatureAction::from_tag(&block.tag).ok_or_else(|| {
            RegistryError::malformed(
                "feature",
                format!("unexpected <{}> in feature '{name}'", block.tag),
            )
        })?;
        for component in &block.children {
            let kind = EntityKind::from_tag(&component.tag).ok_or_else(|| {
                RegistryError::malformed(
                    "feature",
                    format!("unexpected <{}> in <{}> of '{name}'", component.tag, block.tag),
                )
            })?;
            let component_name = required_attr(component, "feature", "name")?;
            operations.push(FeatureOperation {
                action,
                kind,
                name: Name::new(component_name),
            });
        }
    }

    tracing::trace!("Feature {name} ({api}): {} operations", operations.len());
    store.push_feature_level(FeatureLevel {
        name,
        api,
        number: feature.attr("number").map(str::to_string),
        operations,
    })
}
