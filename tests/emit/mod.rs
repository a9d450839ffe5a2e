//! Artifact writer tests
//!
//! - Payload construction and its errors
//! - Header and loader module agree on loaded functions
//! - Files written to disk

pub mod tests_render;
