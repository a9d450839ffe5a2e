#![allow(clippy::unwrap_used, clippy::expect_used)]

use glsys::emit::{EmissionPayload, EmitOptions, render_header, render_loader, write_artifacts};
use glsys::resolve::{ResolveOptions, ResolvedFeature};
use glsys::{EntityKind, EntityStore, RegistryError};

use crate::helpers::registry_fixtures::GL_REGISTRY;
use crate::helpers::{registry, store};

fn resolved<'s>(store: &'s EntityStore, feature: &str, library: Option<&str>) -> ResolvedFeature<'s> {
    ResolvedFeature::resolve(store, feature, library, &ResolveOptions::default()).unwrap()
}

#[test]
fn test_payload_contents() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_3_2", Some("GL_VERSION_1_1"));
    let payload = EmissionPayload::build(&store, &resolved).unwrap();

    assert_eq!(payload.version, Some(("3", "2")));
    assert_eq!(payload.known_features.len(), 5);
    assert_eq!(payload.constants[0], ("GL_FALSE", "0"));
    assert_eq!(payload.linked.len(), 5);
    let pointers: Vec<_> = payload.loaded.iter().map(|f| f.pointer_type.as_str()).collect();
    assert_eq!(
        pointers,
        vec![
            "PFNGLBUFFERDATAPROC",
            "PFNGLDEBUGMESSAGECALLBACKPROC",
            "PFNGLSHADERSOURCEPROC",
        ]
    );
}

#[test]
fn test_header_sections() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_3_2", Some("GL_VERSION_1_1"));
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let header = render_header(&payload, &EmitOptions::default());

    for expected in [
        " * Below is the copyright that came with the spec XML:",
        " * Copyright 2013-2020 The Khronos Group Inc.",
        "// Custom header for minimal feature GL_VERSION_3_2",
        "#ifndef GL_SYS_GENERATED_H_GL_VERSION_3_2",
        "#define GL_ES_VERSION_2_0 0",
        "#define GL_VERSION_3_2    4",
        "#define GLSYS_FEATURE_VERSION GL_VERSION_3_2",
        "#define GLSYS_FEATURE_MAJOR_VERSION 3",
        "#define GLSYS_FEATURE_MINOR_VERSION 2",
        "#define GLSYS_FEATURE_VERSION_STRING \"GL_VERSION_3_2\"",
        "#include <stddef.h>",
        "typedef ptrdiff_t GLsizeiptr;",
        "typedef void (* PFNGLBUFFERDATAPROC)(GLenum target, GLsizeiptr size, const void * data, GLenum usage);",
        "#define GL_FALSE                    0",
        "#define GL_SHADING_LANGUAGE_VERSION 0x8B8C",
        "typedef void (*glsysFuncPtr)();",
        "typedef glsysFuncPtr (*glsysFunctionLoader)(const char*);",
        "int glsysLoadFunctions(glsysFunctionLoader functionLoader);",
        "// Functions contained in our system lib for feature GL_VERSION_1_1",
        "const GLubyte * glGetString(GLenum name);",
        "void glFinish();",
        "// Function pointers to be retrieved for feature GL_VERSION_3_2",
        "extern PFNGLBUFFERDATAPROC           glBufferData;",
        "extern PFNGLDEBUGMESSAGECALLBACKPROC glDebugMessageCallback;",
        "#endif // GL_SYS_GENERATED_H_GL_VERSION_3_2",
    ] {
        assert!(
            header.lines().any(|line| line == expected),
            "missing line {expected:?} in:\n{header}"
        );
    }

    // Linked functions get no pointer typedef.
    assert!(!header.contains("PFNGLCLEARPROC"));
    // Types precede function typedefs.
    let type_pos = header.find("typedef unsigned int GLenum;").unwrap();
    let typedef_pos = header.find("typedef void (* PFNGLBUFFERDATAPROC)").unwrap();
    assert!(type_pos < typedef_pos);
}

#[test]
fn test_header_without_library_loads_everything() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_1_0", None);
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let header = render_header(&payload, &EmitOptions::default());

    assert!(!header.contains("Functions contained in our system lib"));
    assert!(header.contains("extern PFNGLCLEARPROC       glClear;"));
    assert!(header.contains("extern PFNGLMATRIXMODEPROC  glMatrixMode;"));
}

#[test]
fn test_header_and_loader_agree() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_3_2", Some("GL_VERSION_1_0"));
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let options = EmitOptions::default();
    let header = render_header(&payload, &options);
    let loader = render_loader(&payload, "glsys.h", &options);

    let from_header: Vec<(String, String)> = header
        .lines()
        .filter_map(|line| line.strip_prefix("extern "))
        .filter(|rest| rest.starts_with("PFN"))
        .filter_map(|rest| {
            let mut parts = rest.trim_end_matches(';').split_whitespace();
            Some((parts.next()?.to_string(), parts.next()?.to_string()))
        })
        .collect();
    let from_loader: Vec<(String, String)> = loader
        .lines()
        .take_while(|line| !line.starts_with("int "))
        .filter(|line| line.starts_with("PFN"))
        .filter_map(|line| {
            let mut parts = line.trim_end_matches(';').split_whitespace();
            Some((parts.next()?.to_string(), parts.next()?.to_string()))
        })
        .collect();

    assert!(!from_header.is_empty());
    assert_eq!(from_header, from_loader);
}

#[test]
fn test_loader_module() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_3_2", Some("GL_VERSION_1_1"));
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let loader = render_loader(&payload, "glsys.h", &EmitOptions::default());

    let expected = "\
#include <assert.h>
#include \"glsys.h\"

PFNGLBUFFERDATAPROC           glBufferData;
PFNGLDEBUGMESSAGECALLBACKPROC glDebugMessageCallback;
PFNGLSHADERSOURCEPROC         glShaderSource;

int glsysLoadFunctions(glsysFunctionLoader functionLoader)
{
    glBufferData           = (PFNGLBUFFERDATAPROC)functionLoader(\"glBufferData\");
    glDebugMessageCallback = (PFNGLDEBUGMESSAGECALLBACKPROC)functionLoader(\"glDebugMessageCallback\");
    glShaderSource         = (PFNGLSHADERSOURCEPROC)functionLoader(\"glShaderSource\");

    assert(glBufferData           != NULL);
    assert(glDebugMessageCallback != NULL);
    assert(glShaderSource         != NULL);
    return 0;
}
";
    assert_eq!(loader, expected);
}

#[test]
fn test_custom_loader_prefix() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_ES_VERSION_2_0", None);
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let options = EmitOptions {
        loader_prefix: "es2".to_string(),
        ..EmitOptions::default()
    };
    let header = render_header(&payload, &options);
    let loader = render_loader(&payload, "es2.h", &options);

    assert!(header.contains("int es2LoadFunctions(es2FunctionLoader functionLoader);"));
    assert!(loader.contains("int es2LoadFunctions(es2FunctionLoader functionLoader)\n{"));
    assert!(header.contains("typedef khronos_int8_t GLbyte;"));
}

#[test]
fn test_constant_without_value() {
    let store = store(&registry(
        r#"<groups><group name="Boolean"><enum name="GL_TRUE"/></group></groups>
           <feature api="gl" name="V_1_0"><require><enum name="GL_TRUE"/></require></feature>"#,
    ));
    let resolved = resolved(&store, "V_1_0", None);
    match EmissionPayload::build(&store, &resolved) {
        Err(RegistryError::UnknownEntity { kind, name, .. }) => {
            assert_eq!(kind, EntityKind::Constant);
            assert_eq!(name, "GL_TRUE");
        }
        other => panic!("expected unknown constant, got {other:?}"),
    }
}

#[test]
fn test_feature_name_without_version_components() {
    let store = store(&registry(r#"<feature api="gl" name="BASELINE"/>"#));
    let resolved = resolved(&store, "BASELINE", None);
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let header = render_header(&payload, &EmitOptions::default());

    assert_eq!(payload.version, None);
    assert!(!header.contains("MAJOR_VERSION"));
    assert!(header.contains("#define GLSYS_FEATURE_VERSION_STRING \"BASELINE\""));
}

#[test]
fn test_write_artifacts() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_2_0", Some("GL_VERSION_1_1"));
    let payload = EmissionPayload::build(&store, &resolved).unwrap();
    let options = EmitOptions::default();

    let dir = tempfile::tempdir().unwrap();
    let header_path = dir.path().join("include").join("glsys.h");
    std::fs::create_dir_all(header_path.parent().unwrap()).unwrap();
    let loader_path = dir.path().join("glsys.c");

    write_artifacts(&payload, &header_path, &loader_path, &options).unwrap();

    let header = std::fs::read_to_string(&header_path).unwrap();
    let loader = std::fs::read_to_string(&loader_path).unwrap();
    assert_eq!(header, render_header(&payload, &options));
    assert!(loader.starts_with("#include <assert.h>\n#include \"glsys.h\"\n"));
}

#[test]
fn test_write_artifacts_into_missing_directory() {
    let store = store(GL_REGISTRY);
    let resolved = resolved(&store, "GL_VERSION_1_0", None);
    let payload = EmissionPayload::build(&store, &resolved).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let result = write_artifacts(
        &payload,
        &dir.path().join("missing").join("glsys.h"),
        &dir.path().join("glsys.c"),
        &EmitOptions::default(),
    );
    assert!(matches!(result, Err(RegistryError::Io(_))));
}
