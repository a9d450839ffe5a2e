//! Registry layer tests
//!
//! - Ingestion of every section of a gl.xml-shaped document
//! - Structural errors surfaced as malformed entities

pub mod tests_ingest;
