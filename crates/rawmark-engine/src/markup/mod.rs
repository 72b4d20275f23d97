//! Tolerant, non-validating markup scanning.
//!
//! The block never interprets markup semantically; it only needs to lift
//! executable fragments out of inert text (script re-hosting) and, for the
//! host's generic sanitizer, to strip tags from a field. Both are total
//! functions: any input yields a result, malformed structure degrades to
//! treating bytes as plain text.

pub mod cursor;
mod scanner;

pub use scanner::{ScriptFragment, extract_scripts, strip_tags};
