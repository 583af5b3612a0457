//! `cleanup:*` commands: remove stale cookie and log files

use crate::{
    config::StorageSettings,
    resource::{CookieFiles, LogFiles, ResourceFile},
};
use anyhow::{Context, Result};
use std::time::Duration;

fn report(removed: &[ResourceFile], noun: &str, verbose: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    if verbose {
        lines.extend(
            removed
                .iter()
                .map(|file| format!("Removed {}", file.path().display())),
        );
    }
    lines.push(format!("Cleared {} {}.", removed.len(), noun));
    lines.join("\n")
}

/// Remove cookie files older than `lifetime` seconds (default from settings)
pub fn run_cleanup_cookies(
    storage: &StorageSettings,
    lifetime: Option<u64>,
    verbose: bool,
) -> Result<String> {
    let lifetime = lifetime
        .map(Duration::from_secs)
        .unwrap_or_else(|| storage.cookie_lifetime());

    let removed = CookieFiles::from_settings(storage)
        .remove_all(lifetime)
        .context("Failed to remove cookie files")?;

    Ok(report(&removed, "cookie(s)", verbose))
}

/// Remove all request log files
pub fn run_cleanup_logs(storage: &StorageSettings, verbose: bool) -> Result<String> {
    let removed = LogFiles::from_settings(storage)
        .remove_all()
        .context("Failed to remove log files")?;

    Ok(report(&removed, "log file(s)", verbose))
}
