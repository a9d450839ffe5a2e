//! Declaration header rendering.

use std::fmt::Write;

use super::options::EmitOptions;
use super::payload::EmissionPayload;

const SEPARATOR_WIDTH: usize = 70;

fn separator() -> String {
    format!("//{}", "-".repeat(SEPARATOR_WIDTH))
}

/// A comment line framed by separator lines.
fn banner(out: &mut String, text: &str) {
    let sep = separator();
    let _ = writeln!(out, "{sep}\n{text}\n{sep}");
}

/// Width of the longest item, for left-aligned columns.
pub(crate) fn column_width<I, S>(items: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().len())
        .max()
        .unwrap_or(0)
}

/// Render the declaration header for a payload.
pub fn render_header(payload: &EmissionPayload<'_>, options: &EmitOptions) -> String {
    let mut out = String::new();
    let feature = payload.feature.as_str();
    let guard = options.include_guard(feature);
    let macro_prefix = options.version_macro_prefix.as_str();

    if let Some(comment) = payload.header_comment {
        out.push_str("/**\n");
        out.push_str(" * Below is the copyright that came with the spec XML:\n");
        for line in comment.lines() {
            let _ = writeln!(out, " * {line}");
        }
        out.push_str(" */\n");
    }
    banner(&mut out, &format!("// Custom header for minimal feature {feature}"));
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}\n");
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif // __cplusplus\n\n");

    // Feature macros
    out.push_str("// Known features\n");
    let width = column_width(&payload.known_features);
    for (index, name) in payload.known_features.iter().enumerate() {
        let _ = writeln!(out, "#define {name:width$} {index}");
    }
    out.push_str("// Selected feature\n");
    let _ = writeln!(out, "#define {macro_prefix}_VERSION {feature}");
    if let Some((major, minor)) = payload.version {
        let _ = writeln!(out, "#define {macro_prefix}_MAJOR_VERSION {major}");
        let _ = writeln!(out, "#define {macro_prefix}_MINOR_VERSION {minor}");
    }
    let _ = writeln!(out, "#define {macro_prefix}_VERSION_STRING \"{feature}\"\n");

    for definition in &payload.types {
        let _ = writeln!(out, "{}", definition.definition);
    }
    out.push('\n');

    for function in &payload.loaded {
        let _ = writeln!(out, "{}", function.signature.pointer_typedef());
    }
    out.push('\n');

    let width = column_width(payload.constants.iter().map(|(name, _)| name));
    for (name, value) in &payload.constants {
        let _ = writeln!(out, "#define {name:width$} {value}");
    }
    out.push('\n');

    // Loader entry point
    banner(&mut out, "// Function initialization/loading (single context only!)");
    let func_ptr = options.func_ptr_type();
    let _ = writeln!(out, "typedef void (*{func_ptr})();");
    let _ = writeln!(
        out,
        "typedef {func_ptr} (*{})(const char*);",
        options.function_loader_type()
    );
    let _ = writeln!(out, "{};\n", options.load_functions_signature());

    if let Some(library) = &payload.library {
        if !payload.linked.is_empty() {
            banner(
                &mut out,
                &format!("// Functions contained in our system lib for feature {library}"),
            );
        }
    }
    for signature in &payload.linked {
        let _ = writeln!(out, "{}", signature.declaration());
    }
    out.push('\n');

    if !payload.loaded.is_empty() {
        banner(
            &mut out,
            &format!("// Function pointers to be retrieved for feature {feature}"),
        );
    }
    let width = column_width(payload.loaded.iter().map(|f| &f.pointer_type));
    for function in &payload.loaded {
        let _ = writeln!(
            out,
            "extern {:width$} {};",
            function.pointer_type, function.signature.name
        );
    }

    out.push_str("#ifdef __cplusplus\n}\n#endif // __cplusplus\n");
    let _ = writeln!(out, "#endif // {guard}");
    out
}
