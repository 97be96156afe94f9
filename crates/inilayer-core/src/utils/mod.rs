//! Utility functions and helpers.
//!
//! Common functionality used across multiple inilayer crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{is_file, probe_path, PathKind};
