//! Typed, layered INI configuration
//!
//! This crate reads INI-style files whose sections each hold one value type,
//! exposes every section as a typed map, merges several files into one view
//! (later files override earlier ones) and writes changed values back to the
//! file they belong to.

pub mod ini;
pub mod value;
pub mod section;
pub mod source;
pub mod aggregate;

// Re-export main types
pub use ini::IniFile;
pub use value::{ConfigValue, ValueKind};
pub use section::{TypedMap, TypedMaps};
pub use source::SourceConfig;
pub use aggregate::{AggregateConfig, WritePolicy};

use inilayer_core::error::LayerError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, LayerError>;
