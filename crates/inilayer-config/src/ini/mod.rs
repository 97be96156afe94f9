//! INI file reading and writing
//!
//! The raw store behind every configuration source: named sections of
//! `key = value` lines, kept in file order, with no interpretation of values.

use std::fmt::Write as _;

use camino::Utf8Path;
use indexmap::IndexMap;
use inilayer_core::error::LayerError;
use tracing::debug;

use crate::ConfigResult;

/// Section that holds entries appearing before the first header
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One section's raw entries, in file order
pub type RawSection = IndexMap<String, String>;

/// In-memory INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    sections: IndexMap<String, RawSection>,
}

impl IniFile {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text; errors are reported against `<inline>`
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Self::parse_named(content, "<inline>")
    }

    /// Parse INI text, naming `origin` in error messages
    pub fn parse_named(content: &str, origin: &str) -> ConfigResult<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let syntax_error = |line: usize, message: &str| LayerError::IniParse {
            path: origin.to_string(),
            line,
            message: message.to_string(),
        };

        let mut file = Self::new();
        let mut current = DEFAULT_SECTION.to_string();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| syntax_error(line_no, "unterminated section header"))?
                    .trim();
                if name.is_empty() {
                    return Err(syntax_error(line_no, "empty section name"));
                }
                current = name.to_string();
                file.sections.entry(current.clone()).or_default();
                continue;
            }

            let split = trimmed
                .find(['=', ':'])
                .ok_or_else(|| syntax_error(line_no, "expected 'key = value'"))?;
            let key = trimmed[..split].trim();
            if key.is_empty() {
                return Err(syntax_error(line_no, "missing key before separator"));
            }
            let value = unquote(trimmed[split + 1..].trim());

            file.sections
                .entry(current.clone())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }

        Ok(file)
    }

    /// Load a document from disk
    pub fn load(path: &Utf8Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LayerError::io(format!("Failed to read {}", path), e))?;
        let file = Self::parse_named(&content, path.as_str())?;
        debug!(path = %path, sections = file.sections.len(), "loaded ini file");
        Ok(file)
    }

    /// Load a primary file and fold extra files over it.
    ///
    /// Keys in later files replace the same key of the same section in earlier
    /// ones; everything else is kept.
    pub fn load_layered<P: AsRef<Utf8Path>>(primary: &Utf8Path, extras: &[P]) -> ConfigResult<Self> {
        let mut file = Self::load(primary)?;
        for extra in extras {
            let overlay = Self::load(extra.as_ref())?;
            file.overlay(overlay);
        }
        Ok(file)
    }

    /// Apply every entry of `other` on top of this document
    pub fn overlay(&mut self, other: IniFile) {
        for (name, entries) in other.sections {
            let section = self.sections.entry(name).or_default();
            for (key, value) in entries {
                section.insert(key, value);
            }
        }
    }

    /// Get a whole section by name
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.get(name)
    }

    /// Get a single raw value
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Set a raw value, creating the section and key if absent.
    ///
    /// Returns the previous value for the key, if any.
    pub fn set_value(&mut self, section: &str, key: &str, value: impl Into<String>) -> Option<String> {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into())
    }

    /// Remove a key from a section, returning its value
    pub fn remove_key(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections
            .get_mut(section)
            .and_then(|entries| entries.shift_remove(key))
    }

    /// Check whether a section exists
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Render the document as INI text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, (name, entries)) in self.sections.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", name);
            for (key, value) in entries {
                if needs_quoting(value) {
                    let _ = writeln!(out, "{} = \"{}\"", key, value);
                } else {
                    let _ = writeln!(out, "{} = {}", key, value);
                }
            }
        }
        out
    }

    /// Write the document to `path`, replacing its contents
    pub fn save_to(&self, path: &Utf8Path) -> ConfigResult<()> {
        std::fs::write(path, self.render())
            .map_err(|e| LayerError::io(format!("Failed to write {}", path), e))
    }
}

impl std::str::FromStr for IniFile {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Why `key` would not read back as the same key after rendering, if it would not
pub fn key_problem(key: &str) -> Option<&'static str> {
    if key.trim().is_empty() {
        Some("key is blank")
    } else if key.trim() != key {
        Some("key has leading or trailing whitespace")
    } else if key.contains(['\n', '\r']) {
        Some("key contains a line break")
    } else if key.contains(['=', ':']) {
        Some("key contains a separator ('=' or ':')")
    } else if key.starts_with(['[', '#', ';']) {
        Some("key starts with '[', '#' or ';'")
    } else {
        None
    }
}

/// Whether `value` renders on a single line
pub fn is_single_line(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

/// Strip one pair of matching double quotes or backticks
fn unquote(value: &str) -> &str {
    for quote in ['"', '`'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn needs_quoting(value: &str) -> bool {
    value.trim() != value || unquote(value) != value
}
