//! Resolution layer tests
//!
//! - Type closure: closest match, one-level prerequisites, document order
//! - Linked/loaded partition against a library feature
