//! Filesystem helpers

use crate::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary directory that is removed, with the files in it, on drop
pub struct TempFolder {
    path: PathBuf,
}

impl TempFolder {
    pub fn new() -> Result<Self> {
        let mut path = env::temp_dir();
        let unique = format!(
            "stlmesh_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        );
        path.push(unique);
        fs::create_dir_all(&path)
            .map_err(|e| Error::FileSave(format!("Failed to create temp dir: {}", e)))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFolder {
    fn drop(&mut self) {
        if let Ok(entries) = fs::read_dir(&self.path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    let _ = fs::remove_file(path);
                }
            }
        }
        let _ = fs::remove_dir(&self.path);
    }
}
