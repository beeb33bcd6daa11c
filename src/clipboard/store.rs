use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::*;

use super::entry::ClipboardEntry;

/// Keeps the whole history as a single JSON array on disk.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<ClipboardEntry> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read clipboard history {:?}: {}", self.path, err);
                }
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "Discarding unreadable clipboard history {:?}: {}",
                    self.path, err
                );
                Vec::new()
            }
        }
    }

    pub fn save(&self, entries: &[ClipboardEntry]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let bytes = serde_json::to_vec(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;
        Ok(())
    }
}
