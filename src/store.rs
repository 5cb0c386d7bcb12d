use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

/// A single JSON document on disk.
///
/// `load` never fails: a missing file is an empty document and an unreadable
/// or corrupt one is logged and treated the same way. Writes replace the
/// whole file through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like `load`, but a file that exists and cannot be read or parsed is
    /// an error. A missing file is still an empty document.
    pub async fn try_load<T: DeserializeOwned + Default>(&self) -> Result<T> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    pub async fn load<T: DeserializeOwned + Default>(&self) -> T {
        match self.try_load().await {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unusable store, starting empty");
                T::default()
            }
        }
    }

    /// Move the current file aside to `<name>.bak`, replacing an older backup.
    pub async fn back_up(&self) -> Result<PathBuf> {
        let backup = self.sibling(".bak");
        tokio::fs::rename(&self.path, &backup)
            .await
            .with_context(|| format!("Failed to back up {}", self.path.display()))?;
        warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            "moved unusable store aside"
        );
        Ok(backup)
    }

    pub async fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut body = serde_json::to_vec_pretty(value)?;
        body.push(b'\n');

        let tmp = self.sibling(".tmp");
        tokio::fs::write(&tmp, &body)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!(path = %self.path.display(), bytes = body.len(), "saved store");
        Ok(())
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
