//! # inilayer-core
//!
//! Core types and utilities shared across all inilayer crates.
//!
//! This crate provides:
//! - LayerError enum for unified error handling
//! - Filesystem helpers used to validate configuration sources
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{LayerError, LayerResult};
pub use utils::{probe_path, PathKind};
