//! inilayer benchmarking suite
//!
//! Benchmarks for INI parsing, typed section coercion and layered merging.

pub mod common;

pub use common::*;
