//! Request log files

use super::{FilePattern, ResourceFile};
use crate::{Result, config::StorageSettings};
use std::path::{Path, PathBuf};

/// Request log files (`cpanel_requests_<id>.log`) in one directory
#[derive(Debug, Clone)]
pub struct LogFiles {
    pattern: FilePattern,
}

impl LogFiles {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            pattern: FilePattern::new(directory, "cpanel_requests_", ".log"),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.log_directory)
    }

    pub fn directory(&self) -> &Path {
        self.pattern.directory()
    }

    pub fn create(&self) -> Result<ResourceFile> {
        self.pattern.create_unique()
    }

    pub fn list_all(&self) -> Result<Vec<ResourceFile>> {
        self.pattern.list()
    }

    /// Remove every log file
    pub fn remove_all(&self) -> Result<Vec<ResourceFile>> {
        let files = self.list_all()?;
        for file in &files {
            file.remove()?;
        }

        tracing::info!(
            "Removed {} log file(s) from {}",
            files.len(),
            self.directory().display()
        );
        Ok(files)
    }
}
