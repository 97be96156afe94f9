//! Typed sections: raw strings to typed maps
//!
//! Each value type reads exactly one section of a file. Parsing is
//! best-effort: an entry whose text does not coerce to the section's type is
//! left out of the result and the rest of the section is still read.

use std::collections::HashMap;

use tracing::trace;

use crate::ini::{IniFile, RawSection};
use crate::value::{ConfigValue, ValueKind};

/// Key to typed value, for one section
pub type TypedMap<T> = HashMap<String, T>;

/// Runs `$body` with `$ty` aliased to the Rust type stored for `$kind`
macro_rules! dispatch_kind {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            ValueKind::String => {
                type $ty = String;
                $body
            }
            ValueKind::Bool => {
                type $ty = bool;
                $body
            }
            ValueKind::Int => {
                type $ty = i32;
                $body
            }
            ValueKind::Int64 => {
                type $ty = i64;
                $body
            }
            ValueKind::Uint => {
                type $ty = u32;
                $body
            }
            ValueKind::Uint64 => {
                type $ty = u64;
                $body
            }
            ValueKind::Float32 => {
                type $ty = f32;
                $body
            }
            ValueKind::Float64 => {
                type $ty = f64;
                $body
            }
            ValueKind::StringList => {
                type $ty = Vec<String>;
                $body
            }
            ValueKind::IntList => {
                type $ty = Vec<i32>;
                $body
            }
        }
    };
}

/// A value type backed by its own file section
pub trait TypedSection: Clone + Sized {
    /// Kind, and therefore section, this type reads
    const KIND: ValueKind;

    /// Coerce one raw value; `None` drops the entry
    fn coerce(raw: &str) -> Option<Self>;

    /// Wrap into the tagged value
    fn into_value(self) -> ConfigValue;

    /// This type's map inside a set of typed maps
    fn map(maps: &TypedMaps) -> &TypedMap<Self>;

    /// Mutable access to this type's map inside a set of typed maps
    fn map_mut(maps: &mut TypedMaps) -> &mut TypedMap<Self>;

    /// Parse a raw section into a fresh typed map
    fn parse(raw: Option<&RawSection>) -> TypedMap<Self> {
        let Some(raw) = raw else {
            return TypedMap::new();
        };

        let mut parsed = TypedMap::with_capacity(raw.len());
        for (key, value) in raw {
            match Self::coerce(value) {
                Some(typed) => {
                    parsed.insert(key.clone(), typed);
                }
                None => {
                    trace!(
                        section = Self::KIND.section_name(),
                        key = %key,
                        raw = %value,
                        "dropping entry that does not parse"
                    );
                }
            }
        }
        parsed
    }
}

macro_rules! typed_section {
    ($ty:ty, $kind:ident, $field:ident, $coerce:expr) => {
        impl TypedSection for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn coerce(raw: &str) -> Option<Self> {
                ($coerce)(raw)
            }

            fn into_value(self) -> ConfigValue {
                ConfigValue::$kind(self)
            }

            fn map(maps: &TypedMaps) -> &TypedMap<Self> {
                &maps.$field
            }

            fn map_mut(maps: &mut TypedMaps) -> &mut TypedMap<Self> {
                &mut maps.$field
            }
        }
    };
}

typed_section!(String, String, strings, |raw: &str| Some(raw.to_string()));
typed_section!(bool, Bool, bools, parse_bool);
typed_section!(i32, Int, ints, |raw: &str| raw.trim().parse().ok());
typed_section!(i64, Int64, int64s, |raw: &str| raw.trim().parse().ok());
typed_section!(u32, Uint, uints, |raw: &str| raw.trim().parse().ok());
typed_section!(u64, Uint64, uint64s, |raw: &str| raw.trim().parse().ok());
typed_section!(f32, Float32, float32s, |raw: &str| raw.trim().parse().ok());
typed_section!(f64, Float64, float64s, |raw: &str| raw.trim().parse().ok());
typed_section!(Vec<String>, StringList, string_lists, parse_string_list);
typed_section!(Vec<i32>, IntList, int_lists, parse_int_list);

/// Boolean literals: `1 t T TRUE true True` and `0 f F FALSE false False`
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split a `[a, b, c]` literal into trimmed, non-empty items.
///
/// Returns `None` unless the trimmed text is wrapped in one pair of brackets
/// with a non-blank body.
pub fn list_items(raw: &str) -> Option<Vec<&str>> {
    let body = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    if body.trim().is_empty() {
        return None;
    }
    Some(
        body.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// Parse a string list literal
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    list_items(raw).map(|items| items.into_iter().map(str::to_string).collect())
}

/// Parse an int list literal, dropping items that are not decimal integers
pub fn parse_int_list(raw: &str) -> Option<Vec<i32>> {
    list_items(raw).map(|items| items.into_iter().filter_map(|item| item.parse().ok()).collect())
}

impl ConfigValue {
    /// Coerce text to a value of `kind` with the same rules the sections use
    pub fn parse_as(kind: ValueKind, raw: &str) -> Option<ConfigValue> {
        dispatch_kind!(kind, T => T::coerce(raw).map(T::into_value))
    }
}

/// One typed map per value kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedMaps {
    pub strings: TypedMap<String>,
    pub bools: TypedMap<bool>,
    pub ints: TypedMap<i32>,
    pub int64s: TypedMap<i64>,
    pub uints: TypedMap<u32>,
    pub uint64s: TypedMap<u64>,
    pub float32s: TypedMap<f32>,
    pub float64s: TypedMap<f64>,
    pub string_lists: TypedMap<Vec<String>>,
    pub int_lists: TypedMap<Vec<i32>>,
}

impl TypedMaps {
    /// Create empty maps
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every section of `store`
    pub fn from_store(store: &IniFile) -> Self {
        let mut maps = Self::new();
        for kind in ValueKind::ALL {
            maps.reparse(kind, store);
        }
        maps
    }

    /// Replace the map for `kind` with a fresh parse of its section
    pub fn reparse(&mut self, kind: ValueKind, store: &IniFile) {
        dispatch_kind!(kind, T => {
            *T::map_mut(self) = T::parse(store.section(kind.section_name()));
        })
    }

    /// Replace the map for `kind` with the left fold of `layers`.
    ///
    /// Later layers overwrite earlier ones on key collision.
    pub fn refold<'a, I>(&mut self, kind: ValueKind, layers: I)
    where
        I: IntoIterator<Item = &'a TypedMaps>,
    {
        dispatch_kind!(kind, T => {
            let mut merged: TypedMap<T> = TypedMap::new();
            for layer in layers {
                for (key, value) in T::map(layer) {
                    merged.insert(key.clone(), value.clone());
                }
            }
            *T::map_mut(self) = merged;
        })
    }

    /// Whether `key` is present in the map for `kind`
    pub fn contains(&self, kind: ValueKind, key: &str) -> bool {
        dispatch_kind!(kind, T => T::map(self).contains_key(key))
    }

    /// Whether `key` is present in any of the maps
    pub fn contains_key(&self, key: &str) -> bool {
        ValueKind::ALL.into_iter().any(|kind| self.contains(kind, key))
    }

    /// First kind, in `ValueKind::ALL` order, whose map holds `key`
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        ValueKind::ALL.into_iter().find(|kind| self.contains(*kind, key))
    }

    /// Look up `key` in the map for `kind`
    pub fn get(&self, kind: ValueKind, key: &str) -> Option<ConfigValue> {
        dispatch_kind!(kind, T => T::map(self).get(key).cloned().map(T::into_value))
    }

    /// Entries of the map for `kind`, sorted by key
    pub fn entries(&self, kind: ValueKind) -> Vec<(&str, ConfigValue)> {
        let mut entries: Vec<(&str, ConfigValue)> = dispatch_kind!(kind, T => {
            T::map(self)
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone().into_value()))
                .collect()
        });
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of entries in the map for `kind`
    pub fn len_of(&self, kind: ValueKind) -> usize {
        dispatch_kind!(kind, T => T::map(self).len())
    }

    /// Number of entries across all maps
    pub fn len(&self) -> usize {
        ValueKind::ALL.into_iter().map(|kind| self.len_of(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
