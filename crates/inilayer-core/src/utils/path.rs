//! Path utilities for validating configuration sources.
//!
//! A source path is only loaded when it names a regular file; missing paths and
//! directories are reported so callers can skip them.

use camino::Utf8Path;

/// What a path points at on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A regular file (or anything that is not a directory)
    File,
    /// A directory
    Directory,
    /// Nothing exists at the path
    Missing,
}

/// Classify a path.
///
/// Stat failures other than "not found" (permission errors, for instance) are
/// classified as `File` so that the subsequent load reports the real error.
pub fn probe_path(path: &Utf8Path) -> PathKind {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::File,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PathKind::Missing,
        Err(_) => PathKind::File,
    }
}

/// Check if a path names a loadable file
pub fn is_file(path: &Utf8Path) -> bool {
    probe_path(path) == PathKind::File
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_probe_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = utf8(temp_dir.path());
        let file = dir.join("app.conf");
        std::fs::write(&file, "[sectionInt]\nPORT = 80\n").unwrap();

        assert_eq!(probe_path(&file), PathKind::File);
        assert_eq!(probe_path(&dir), PathKind::Directory);
        assert_eq!(probe_path(&dir.join("missing.conf")), PathKind::Missing);
    }

    #[test]
    fn test_is_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = utf8(temp_dir.path());
        let file = dir.join("app.conf");
        std::fs::write(&file, "").unwrap();

        assert!(is_file(&file));
        assert!(!is_file(&dir));
        assert!(!is_file(&dir.join("nope.conf")));
    }
}
