use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::SyncState;

/// Bumped whenever the envelope or a document schema changes incompatibly.
pub const CACHE_VERSION: u32 = 1;

/// Durable key-value storage for content documents: one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

/// On-disk envelope around a cached document.
#[derive(Debug, Deserialize)]
pub struct PersistedState<D> {
    pub state: Option<D>,
    pub sync_state: SyncState,
    pub version: u32,
}

#[derive(Serialize)]
struct PersistedStateRef<'a, D> {
    state: Option<&'a D>,
    sync_state: SyncState,
    version: u32,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the raw blob stored under `key`
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Could not read cache file {}", path.display()))?;

        Ok(Some(contents))
    }

    /// Overwrite the blob stored under `key`. The new contents go to a
    /// sibling temp file that is renamed over the old one, so a reader sees
    /// either the previous blob or the new one.
    pub fn write(&self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Could not create cache directory")?;

        let path = self.path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, contents)
            .with_context(|| format!("Could not write cache file {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Could not replace cache file {}", path.display()))?;

        Ok(())
    }

    /// Load and unwrap the envelope under `key`.
    pub fn load_state<D>(&self, key: &str) -> Result<Option<PersistedState<D>>>
    where
        D: for<'de> Deserialize<'de>,
    {
        let Some(contents) = self.read(key)? else {
            return Ok(None);
        };

        let persisted: PersistedState<D> =
            serde_json::from_str(&contents).context("Could not parse cache file")?;

        Ok(Some(persisted))
    }

    /// Wrap `state` in the envelope and write it under `key`.
    pub fn save_state<D: Serialize>(
        &self,
        key: &str,
        state: Option<&D>,
        sync_state: SyncState,
    ) -> Result<()> {
        let envelope = PersistedStateRef {
            state,
            sync_state,
            version: CACHE_VERSION,
        };
        let contents =
            serde_json::to_string_pretty(&envelope).context("Could not serialize content")?;

        self.write(key, &contents)
    }
}
