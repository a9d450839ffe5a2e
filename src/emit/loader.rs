//! Runtime loader module rendering.

use std::fmt::Write;

use super::header::column_width;
use super::options::EmitOptions;
use super::payload::EmissionPayload;

/// Render the loader module that fills every pointer slot of the payload.
///
/// `header_file` is the file name the module includes.
pub fn render_loader(payload: &EmissionPayload<'_>, header_file: &str, options: &EmitOptions) -> String {
    let mut out = String::new();
    out.push_str("#include <assert.h>\n");
    let _ = writeln!(out, "#include \"{header_file}\"\n");

    let width = column_width(payload.loaded.iter().map(|f| &f.pointer_type));
    for function in &payload.loaded {
        let _ = writeln!(
            out,
            "{:width$} {};",
            function.pointer_type, function.signature.name
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{}\n{{", options.load_functions_signature());
    let width = column_width(payload.loaded.iter().map(|f| &f.signature.name));
    for function in &payload.loaded {
        let name = &function.signature.name;
        let _ = writeln!(
            out,
            "    {name:width$} = ({})functionLoader(\"{name}\");",
            function.pointer_type
        );
    }
    out.push('\n');
    for function in &payload.loaded {
        let _ = writeln!(out, "    assert({:width$} != NULL);", function.signature.name);
    }
    out.push_str("    return 0;\n}\n");
    out
}
