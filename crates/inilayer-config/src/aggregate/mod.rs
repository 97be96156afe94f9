//! Merged view over an ordered list of configuration files
//!
//! The first file is the base; every later file overrides it key by key. Writes
//! are routed to the file that should own them and only the affected kind is
//! merged again.

use camino::Utf8Path;
use inilayer_core::error::LayerError;
use tracing::{debug, info};

use crate::section::{TypedMap, TypedMaps};
use crate::source::{check_write, SourceConfig};
use crate::value::{ConfigValue, ValueKind};
use crate::ConfigResult;

/// What `set_value` does when no source matches the key or target path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Ignore the write and return `Ok(())`
    #[default]
    Lenient,
    /// Return `KeyNotFound` / `UnknownSource`
    Strict,
}

/// Layered configuration built from one or more files
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    sources: Vec<SourceConfig>,
    merged: TypedMaps,
    policy: WritePolicy,
}

impl AggregateConfig {
    /// Load `primary` followed by `extras`, in override order.
    ///
    /// Returns `Ok(None)` when `primary` is empty. Paths that do not exist or
    /// are directories are skipped; a file that fails to load is an error.
    pub fn open<P>(primary: impl AsRef<Utf8Path>, extras: &[P]) -> ConfigResult<Option<Self>>
    where
        P: AsRef<Utf8Path>,
    {
        let primary = primary.as_ref();
        if primary.as_str().is_empty() {
            return Ok(None);
        }

        let mut sources = Vec::with_capacity(1 + extras.len());
        for path in std::iter::once(primary).chain(extras.iter().map(AsRef::as_ref)) {
            if let Some(source) = SourceConfig::open(path)? {
                sources.push(source);
            }
        }

        Ok(Some(Self::from_sources(sources)))
    }

    /// Build from sources that are already loaded, first one lowest priority
    pub fn from_sources(sources: Vec<SourceConfig>) -> Self {
        let mut config = Self {
            sources,
            merged: TypedMaps::new(),
            policy: WritePolicy::default(),
        };
        for kind in ValueKind::ALL {
            config.remerge(kind);
        }
        debug!(
            sources = config.sources.len(),
            entries = config.merged.len(),
            "merged configuration sources"
        );
        config
    }

    /// Set how unmatched writes are reported
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_write_policy(&mut self, policy: WritePolicy) {
        self.policy = policy;
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.policy
    }

    /// Loaded sources, in override order
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn source_paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.sources.iter().map(SourceConfig::path)
    }

    /// Source loaded from `path`, if any
    pub fn source(&self, path: &Utf8Path) -> Option<&SourceConfig> {
        self.sources.iter().find(|source| source.path() == path)
    }

    /// Re-parse every source and rebuild all merged maps
    pub fn parse_all(&mut self) -> &TypedMaps {
        for source in &mut self.sources {
            source.parse_all();
        }
        for kind in ValueKind::ALL {
            self.remerge(kind);
        }
        &self.merged
    }

    /// Re-parse one kind in every source and rebuild its merged map
    pub fn parse_kind(&mut self, kind: ValueKind) {
        for source in &mut self.sources {
            source.reparse(kind);
        }
        self.remerge(kind);
    }

    fn remerge(&mut self, kind: ValueKind) {
        self.merged.refold(kind, self.sources.iter().map(SourceConfig::maps));
    }

    /// Write `value` under `key`.
    ///
    /// With a `target` path the value goes to the source loaded from that
    /// path. Without one it goes to every source that already defines `key`.
    /// When nothing matches, the write is dropped or reported according to
    /// the [`WritePolicy`]. Changes stay in memory until [`Self::flush_all`].
    ///
    /// A key or value that would not survive a flush and reload is rejected
    /// with `InvalidKey` / `InvalidValue` before any source is touched.
    pub fn set_value(
        &mut self,
        key: &str,
        value: impl Into<ConfigValue>,
        target: Option<&Utf8Path>,
    ) -> ConfigResult<()> {
        let value = value.into();
        let kind = value.kind();
        check_write(key, &value)?;
        let mut written = 0usize;

        match target.filter(|path| !path.as_str().is_empty()) {
            Some(target) => {
                for source in self.sources.iter_mut().filter(|s| s.path() == target) {
                    source.set_value(key, &value)?;
                    written += 1;
                }
                if written == 0 {
                    return self.unmatched(LayerError::UnknownSource { path: target.to_string() });
                }
            }
            None => {
                for source in self.sources.iter_mut().filter(|s| s.has_key(key)) {
                    source.set_value(key, &value)?;
                    written += 1;
                }
                if written == 0 {
                    return self.unmatched(LayerError::KeyNotFound { key: key.to_string() });
                }
            }
        }

        self.remerge(kind);
        info!(key, kind = %kind, sources = written, "updated merged configuration");
        Ok(())
    }

    fn unmatched(&self, err: LayerError) -> ConfigResult<()> {
        match self.policy {
            WritePolicy::Lenient => {
                debug!(error = %err, "ignoring unmatched write");
                Ok(())
            }
            WritePolicy::Strict => Err(err),
        }
    }

    /// Persist every source in order, stopping at the first failure.
    ///
    /// Sources flushed before the failure stay written.
    pub fn flush_all(&self) -> ConfigResult<()> {
        for source in &self.sources {
            source.flush()?;
        }
        Ok(())
    }

    /// All merged maps
    pub fn maps(&self) -> &TypedMaps {
        &self.merged
    }

    /// Merged value of `key` in the section of `kind`
    pub fn get(&self, kind: ValueKind, key: &str) -> Option<ConfigValue> {
        self.merged.get(kind, key)
    }

    /// Merged value of `key` in the first section, in `ValueKind::ALL` order, that has it
    pub fn lookup(&self, key: &str) -> Option<ConfigValue> {
        self.merged
            .kind_of(key)
            .and_then(|kind| self.merged.get(kind, key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.merged.contains_key(key)
    }

    pub fn strings(&self) -> &TypedMap<String> {
        &self.merged.strings
    }

    pub fn bools(&self) -> &TypedMap<bool> {
        &self.merged.bools
    }

    pub fn ints(&self) -> &TypedMap<i32> {
        &self.merged.ints
    }

    pub fn int64s(&self) -> &TypedMap<i64> {
        &self.merged.int64s
    }

    pub fn uints(&self) -> &TypedMap<u32> {
        &self.merged.uints
    }

    pub fn uint64s(&self) -> &TypedMap<u64> {
        &self.merged.uint64s
    }

    pub fn float32s(&self) -> &TypedMap<f32> {
        &self.merged.float32s
    }

    pub fn float64s(&self) -> &TypedMap<f64> {
        &self.merged.float64s
    }

    pub fn string_lists(&self) -> &TypedMap<Vec<String>> {
        &self.merged.string_lists
    }

    pub fn int_lists(&self) -> &TypedMap<Vec<i32>> {
        &self.merged.int_lists
    }
}
