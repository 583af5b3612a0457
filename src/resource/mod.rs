//! File resources owned by clients and sessions
//!
//! Cookie files back the session cookie jar, log files collect failed
//! requests. Both live in directories configured through
//! [`crate::config::StorageSettings`] and are cleaned up independently of the
//! objects that created them.

pub mod cookie;
pub mod file;
pub mod log;

pub use cookie::{CookieFiles, DEFAULT_COOKIE_LIFETIME};
pub use file::ResourceFile;
pub use log::LogFiles;

use crate::Result;
use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

/// Uniquely named files of one kind inside a directory
#[derive(Debug, Clone)]
pub(crate) struct FilePattern {
    directory: PathBuf,
    prefix: &'static str,
    suffix: &'static str,
}

impl FilePattern {
    pub(crate) fn new(directory: impl Into<PathBuf>, prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            directory: directory.into(),
            prefix,
            suffix,
        }
    }

    pub(crate) fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create a new, empty file with a name no other file in the directory has
    pub(crate) fn create_unique(&self) -> Result<ResourceFile> {
        loop {
            let file = ResourceFile::new(
                self.directory
                    .join(format!("{}{}", unique_identifier(self.prefix), self.suffix)),
            );
            if !file.exists() {
                file.create()?;
                return Ok(file);
            }
        }
    }

    /// All matching files, sorted by path; a missing directory yields nothing
    pub(crate) fn list(&self) -> Result<Vec<ResourceFile>> {
        if !self.directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(self.prefix) && name.ends_with(self.suffix) {
                files.push(ResourceFile::new(entry.path()));
            }
        }

        files.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(files)
    }
}

/// Time-based identifier with process and counter entropy
pub(crate) fn unique_identifier(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = Utc::now();
    format!(
        "{prefix}{:x}{:05x}.{}{}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unique_identifier_differs() {
        let first = unique_identifier("cookie_");
        let second = unique_identifier("cookie_");

        assert!(first.starts_with("cookie_"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_list_ignores_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = FilePattern::new(temp_dir.path(), "cookie_", ".txt");

        let created = pattern.create_unique().unwrap();
        fs::write(temp_dir.path().join("other.txt"), "").unwrap();
        fs::write(temp_dir.path().join("cookie_foo.log"), "").unwrap();
        fs::create_dir(temp_dir.path().join("cookie_dir.txt")).unwrap();

        let listed = pattern.list().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = FilePattern::new(temp_dir.path().join("missing"), "cookie_", ".txt");

        assert!(pattern.list().unwrap().is_empty());
    }
}
