//! Artifact writer: a declaration header and a matching loader module.
//!
//! Both artifacts are rendered from one [`EmissionPayload`], so the pointer
//! slots the header declares are exactly the ones the loader fills.
//!
//! ```text
//! ResolvedFeature ──▶ EmissionPayload ──┬──▶ render_header ──▶ glsys.h
//!                                       └──▶ render_loader ──▶ glsys.c
//! ```

mod header;
mod loader;
mod options;
mod payload;

pub use header::render_header;
pub use loader::render_loader;
pub use options::EmitOptions;
pub use payload::{EmissionPayload, LoadedFunction, split_version};

use std::path::Path;

use crate::base::Result;

/// Render both artifacts and write them to disk.
///
/// The loader includes the header by its file name only.
pub fn write_artifacts(
    payload: &EmissionPayload<'_>,
    header_path: &Path,
    loader_path: &Path,
    options: &EmitOptions,
) -> Result<()> {
    let header_file = header_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| header_path.display().to_string());

    std::fs::write(header_path, render_header(payload, options))?;
    std::fs::write(loader_path, render_loader(payload, &header_file, options))?;

    tracing::debug!(
        "Wrote {} and {} for {}",
        header_path.display(),
        loader_path.display(),
        payload.feature
    );
    Ok(())
}
