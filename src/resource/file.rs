//! Local file handle

use crate::Result;
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};

/// A file on the local filesystem that may or may not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    path: PathBuf,
}

impl ResourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file and its parent directories; existing files are left untouched
    pub fn create(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        Ok(())
    }

    /// Remove the file; missing files are not an error
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn modified(&self) -> Result<SystemTime> {
        Ok(fs::metadata(&self.path)?.modified()?)
    }

    /// Append a single line, creating the file if needed
    pub fn append_line(&self, line: &str) -> Result<()> {
        self.create()?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}
