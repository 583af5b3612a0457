//! Session cookie files

use super::{FilePattern, ResourceFile};
use crate::{Result, config::StorageSettings};
use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

/// Cookie files older than this are considered expired
pub const DEFAULT_COOKIE_LIFETIME: Duration = Duration::from_secs(3600);

/// Cookie files (`cookie_<id>.txt`) in one directory
#[derive(Debug, Clone)]
pub struct CookieFiles {
    pattern: FilePattern,
}

impl CookieFiles {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            pattern: FilePattern::new(directory, "cookie_", ".txt"),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.cookie_directory)
    }

    pub fn directory(&self) -> &Path {
        self.pattern.directory()
    }

    /// Create a new, empty cookie file
    pub fn create(&self) -> Result<ResourceFile> {
        let file = self.pattern.create_unique()?;
        tracing::debug!("Created cookie file {}", file.path().display());
        Ok(file)
    }

    pub fn list_all(&self) -> Result<Vec<ResourceFile>> {
        self.pattern.list()
    }

    /// Remove cookie files last modified at least `lifetime` ago
    pub fn remove_all(&self, lifetime: Duration) -> Result<Vec<ResourceFile>> {
        let Some(cutoff) = SystemTime::now().checked_sub(lifetime) else {
            return Ok(Vec::new());
        };

        let mut removed = Vec::new();
        for file in self.list_all()? {
            if file.modified()? <= cutoff {
                file.remove()?;
                removed.push(file);
            }
        }

        tracing::info!(
            "Removed {} expired cookie file(s) from {}",
            removed.len(),
            self.directory().display()
        );
        Ok(removed)
    }
}
