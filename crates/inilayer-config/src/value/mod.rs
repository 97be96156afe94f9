//! Value kinds and tagged configuration values

use std::fmt;
use std::str::FromStr;

use inilayer_core::error::LayerError;
use serde::Serialize;

/// The ten value types a configuration file can hold.
///
/// Every kind owns exactly one section of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Int64,
    Uint,
    Uint64,
    Float32,
    Float64,
    StringList,
    IntList,
}

impl ValueKind {
    /// Every kind, in lookup order
    pub const ALL: [ValueKind; 10] = [
        ValueKind::String,
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Int64,
        ValueKind::Uint,
        ValueKind::Uint64,
        ValueKind::Float32,
        ValueKind::Float64,
        ValueKind::StringList,
        ValueKind::IntList,
    ];

    /// Name of the file section that holds values of this kind
    pub fn section_name(self) -> &'static str {
        match self {
            ValueKind::String => "sectionString",
            ValueKind::Bool => "sectionBool",
            ValueKind::Int => "sectionInt",
            ValueKind::Int64 => "sectionInt64",
            ValueKind::Uint => "sectionUint",
            ValueKind::Uint64 => "sectionUint64",
            ValueKind::Float32 => "sectionFloat32",
            ValueKind::Float64 => "sectionFloat64",
            ValueKind::StringList => "sectionStringList",
            ValueKind::IntList => "sectionIntList",
        }
    }

    /// Short lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Int64 => "int64",
            ValueKind::Uint => "uint",
            ValueKind::Uint64 => "uint64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::StringList => "string_list",
            ValueKind::IntList => "int_list",
        }
    }

    /// Whether values of this kind use the `[a,b,c]` list syntax
    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::StringList | ValueKind::IntList)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = LayerError;

    /// Accepts the short name (`int64`) or the section name (`sectionInt64`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.section_name() == s)
            .ok_or_else(|| LayerError::UnknownKind { name: s.to_string() })
    }
}

/// A single typed configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Int(i32),
    Int64(i64),
    Uint(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    StringList(Vec<String>),
    IntList(Vec<i32>),
}

impl ConfigValue {
    /// Kind (and therefore section) of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Int64(_) => ValueKind::Int64,
            ConfigValue::Uint(_) => ValueKind::Uint,
            ConfigValue::Uint64(_) => ValueKind::Uint64,
            ConfigValue::Float32(_) => ValueKind::Float32,
            ConfigValue::Float64(_) => ValueKind::Float64,
            ConfigValue::StringList(_) => ValueKind::StringList,
            ConfigValue::IntList(_) => ValueKind::IntList,
        }
    }

    /// Canonical text written to the file: decimal numbers, `true`/`false`,
    /// and `[a,b,c]` with no spaces for lists
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(v) => f.write_str(v),
            ConfigValue::Bool(v) => write!(f, "{}", v),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Int64(v) => write!(f, "{}", v),
            ConfigValue::Uint(v) => write!(f, "{}", v),
            ConfigValue::Uint64(v) => write!(f, "{}", v),
            ConfigValue::Float32(v) => write!(f, "{}", v),
            ConfigValue::Float64(v) => write!(f, "{}", v),
            ConfigValue::StringList(items) => write!(f, "[{}]", items.join(",")),
            ConfigValue::IntList(items) => {
                let items: Vec<String> = items.iter().map(i32::to_string).collect();
                write!(f, "[{}]", items.join(","))
            }
        }
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::String(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int64(v)
    }
}

impl From<u32> for ConfigValue {
    fn from(v: u32) -> Self {
        ConfigValue::Uint(v)
    }
}

impl From<u64> for ConfigValue {
    fn from(v: u64) -> Self {
        ConfigValue::Uint64(v)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        ConfigValue::Float32(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float64(v)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(v: Vec<String>) -> Self {
        ConfigValue::StringList(v)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(v: Vec<&str>) -> Self {
        ConfigValue::StringList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i32>> for ConfigValue {
    fn from(v: Vec<i32>) -> Self {
        ConfigValue::IntList(v)
    }
}
