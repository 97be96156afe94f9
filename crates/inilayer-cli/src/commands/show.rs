//! `inilayer show` command implementation.
//!
//! Prints the merged configuration as INI-style text or JSON, sorted by key.

use std::process::ExitCode;

use inilayer_config::{TypedMaps, ValueKind};
use serde_json::{Map, Value};

use super::CommandContext;

/// Execute the `inilayer show` command
pub fn execute(kind: Option<ValueKind>, json: bool, ctx: &CommandContext) -> anyhow::Result<ExitCode> {
    let kinds = selected_kinds(kind);
    let maps = ctx.config.maps();

    if json {
        println!("{}", serde_json::to_string_pretty(&render_json(maps, &kinds)?)?);
    } else {
        print!("{}", render_text(maps, &kinds));
    }
    Ok(ExitCode::SUCCESS)
}

/// One kind, or all of them
pub fn selected_kinds(kind: Option<ValueKind>) -> Vec<ValueKind> {
    match kind {
        Some(kind) => vec![kind],
        None => ValueKind::ALL.to_vec(),
    }
}

/// Render non-empty sections as `[section]` blocks of `key = value` lines
pub fn render_text(maps: &TypedMaps, kinds: &[ValueKind]) -> String {
    let mut blocks = Vec::new();
    for &kind in kinds {
        let entries = maps.entries(kind);
        if entries.is_empty() {
            continue;
        }
        let mut block = format!("[{}]\n", kind.section_name());
        for (key, value) in entries {
            block.push_str(&format!("{} = {}\n", key, value));
        }
        blocks.push(block);
    }
    blocks.join("\n")
}

/// Render as `{ kind: { key: value } }`
pub fn render_json(maps: &TypedMaps, kinds: &[ValueKind]) -> anyhow::Result<Value> {
    let mut root = Map::new();
    for &kind in kinds {
        let mut section = Map::new();
        for (key, value) in maps.entries(kind) {
            section.insert(key.to_string(), serde_json::to_value(&value)?);
        }
        root.insert(kind.as_str().to_string(), Value::Object(section));
    }
    Ok(Value::Object(root))
}
