//! A single configuration file and its typed view

use camino::{Utf8Path, Utf8PathBuf};
use inilayer_core::error::LayerError;
use inilayer_core::utils::{probe_path, PathKind};
use tracing::{debug, info, warn};

use crate::ini::{is_single_line, key_problem, IniFile};
use crate::section::TypedMaps;
use crate::value::{ConfigValue, ValueKind};
use crate::ConfigResult;

/// One physical configuration file.
///
/// Owns its raw store and one typed map per value kind, parsed from this
/// file alone. Writes go to the raw store first and are only persisted by
/// [`SourceConfig::flush`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    path: Utf8PathBuf,
    store: IniFile,
    maps: TypedMaps,
}

impl SourceConfig {
    /// Load the file at `path`.
    ///
    /// Returns `Ok(None)` when nothing exists at the path or it is a
    /// directory. A file that exists but cannot be read or parsed is an error.
    pub fn open(path: impl Into<Utf8PathBuf>) -> ConfigResult<Option<Self>> {
        let path = path.into();
        match probe_path(&path) {
            PathKind::File => {}
            PathKind::Directory => {
                warn!(path = %path, "skipping configuration source: path is a directory");
                return Ok(None);
            }
            PathKind::Missing => {
                warn!(path = %path, "skipping configuration source: file does not exist");
                return Ok(None);
            }
        }

        let store = IniFile::load(&path)?;
        Ok(Some(Self::from_store(path, store)))
    }

    /// Build a source around an already loaded store
    pub fn from_store(path: impl Into<Utf8PathBuf>, store: IniFile) -> Self {
        let path = path.into();
        let maps = TypedMaps::from_store(&store);
        debug!(path = %path, entries = maps.len(), "parsed configuration source");
        Self { path, store, maps }
    }

    /// Path this source was loaded from and flushes to
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Typed maps as of the last parse
    pub fn maps(&self) -> &TypedMaps {
        &self.maps
    }

    /// Raw store, including unflushed writes
    pub fn raw(&self) -> &IniFile {
        &self.store
    }

    /// Re-parse every section from the raw store
    pub fn parse_all(&mut self) -> &TypedMaps {
        self.maps = TypedMaps::from_store(&self.store);
        &self.maps
    }

    /// Re-parse the section of a single kind
    pub fn reparse(&mut self, kind: ValueKind) {
        self.maps.reparse(kind, &self.store);
    }

    /// Whether `key` is defined in any section of this file
    pub fn has_key(&self, key: &str) -> bool {
        self.maps.contains_key(key)
    }

    /// Write `value` under `key` in the section of its kind.
    ///
    /// Any earlier raw value of `key` in that section is replaced. Only the
    /// written kind is re-parsed; a key previously held under another kind
    /// stays there until that section is rewritten.
    ///
    /// Fails without touching anything when the key or value would not read
    /// back unchanged after a flush.
    pub fn set_value(&mut self, key: &str, value: &ConfigValue) -> ConfigResult<ValueKind> {
        let kind = value.kind();
        let rendered = check_write(key, value)?;
        self.store.set_value(kind.section_name(), key, rendered.as_str());
        self.reparse(kind);
        info!(path = %self.path, key, kind = %kind, value = %rendered, "set configuration value");
        Ok(kind)
    }

    /// Persist the raw store to this source's file
    pub fn flush(&self) -> ConfigResult<()> {
        self.store.save_to(&self.path)?;
        info!(path = %self.path, "flushed configuration source");
        Ok(())
    }
}

/// Render `value` for `key`, rejecting entries the INI grammar cannot round-trip
pub(crate) fn check_write(key: &str, value: &ConfigValue) -> ConfigResult<String> {
    if let Some(reason) = key_problem(key) {
        return Err(LayerError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        });
    }
    let rendered = value.render();
    if !is_single_line(&rendered) {
        return Err(LayerError::InvalidValue {
            kind: value.kind().to_string(),
            raw: rendered,
        });
    }
    Ok(rendered)
}
