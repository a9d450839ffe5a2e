#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::registry_fixtures::GL_REGISTRY;
use crate::helpers::store;

#[test]
fn test_counts() {
    let store = store(GL_REGISTRY);
    assert_eq!(store.type_count(), 15);
    assert_eq!(store.constant_count(), 6);
    assert_eq!(store.function_count(), 9);
    assert_eq!(store.feature_count(), 5);
}

#[test]
fn test_header_comment_is_verbatim() {
    let store = store(GL_REGISTRY);
    let comment = store.header_comment().unwrap();
    assert!(comment.contains("Copyright 2013-2020 The Khronos Group Inc."));
    assert!(comment.contains("SPDX-License-Identifier: Apache-2.0"));
}

#[test]
fn test_type_variants_kept_in_document_order() {
    let store = store(GL_REGISTRY);
    let variants = store.type_definitions("GLbyte");
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].api, None);
    assert_eq!(variants[0].definition, "typedef signed char GLbyte;");
    assert_eq!(variants[1].api.as_deref(), Some("gles2"));
    assert_eq!(variants[1].requires.as_deref(), Some("khrplatform"));
    assert!(variants[0].sort_key < variants[1].sort_key);
}

#[test]
fn test_apientry_marker_contributes_only_its_tail() {
    let store = store(GL_REGISTRY);
    let proc_type = &store.type_definitions("GLDEBUGPROC")[0];
    assert!(
        proc_type
            .definition
            .starts_with("typedef void ( *GLDEBUGPROC)(GLenum source,GLenum type,"),
        "{}",
        proc_type.definition
    );
    assert_eq!(proc_type.sort_key, 14);
}

#[test]
fn test_chunk_types_unescaped() {
    let store = store(GL_REGISTRY);
    assert_eq!(
        store.type_definitions("stddef")[0].definition,
        "#include <stddef.h>"
    );
}

#[test]
fn test_group_seeded_constants_receive_values() {
    let store = store(GL_REGISTRY);
    let vendor = store.constant("GL_VENDOR").unwrap();
    assert_eq!(vendor.group.as_deref(), Some("StringName"));
    assert_eq!(vendor.value.as_deref(), Some("0x1F00"));

    let matrix_mode = store.constant("GL_MATRIX_MODE").unwrap();
    assert_eq!(matrix_mode.group, None);
    assert_eq!(matrix_mode.value.as_deref(), Some("0x0BA0"));
}

#[test]
fn test_parameter_order_matches_declaration() {
    let store = store(GL_REGISTRY);
    let shader_source = store.function("glShaderSource").unwrap();
    let params: Vec<_> = shader_source
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.ty.as_str()))
        .collect();
    assert_eq!(
        params,
        vec![
            ("shader", "GLuint"),
            ("count", "GLsizei"),
            ("string", "const GLchar *const*"),
            ("length", "const GLint *"),
        ]
    );
}

#[test]
fn test_return_types() {
    let store = store(GL_REGISTRY);
    assert_eq!(store.function("glGetString").unwrap().return_type, "const GLubyte *");
    assert_eq!(store.function("glFinish").unwrap().return_type, "void");
    assert!(store.function("glFinish").unwrap().parameters.is_empty());
}

#[test]
fn test_feature_streams() {
    let store = store(GL_REGISTRY);
    let apis: Vec<_> = store.apis().map(|a| a.as_str()).collect();
    assert_eq!(apis, vec!["gl", "gles2"]);
    assert_eq!(store.stream("gl").len(), 4);
    assert_eq!(
        store.feature_level("GL_VERSION_3_2").unwrap().number.as_deref(),
        Some("3.2")
    );
}

#[test]
fn test_ingest_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gl.xml");
    std::fs::write(&path, GL_REGISTRY).unwrap();

    let store = glsys::ingest_path(&path).unwrap();
    assert_eq!(store.feature_count(), 5);
}

#[test]
fn test_ingest_path_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = glsys::ingest_path(&dir.path().join("absent.xml"));
    assert!(matches!(result, Err(glsys::RegistryError::Io(_))));
}
