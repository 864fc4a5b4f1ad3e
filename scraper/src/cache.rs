//! Local store of previously fetched pages, keyed by request.
//!
//! The whole store is one JSON file, rewritten on every insertion. There is
//! no locking: two processes sharing a cache file may clobber each other.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ScrapeError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug)]
pub struct ResponseCache {
    path: PathBuf,
    entries: BTreeMap<String, CachedResponse>,
}

impl ResponseCache {
    /// Opens the cache at `path`; a missing file is an empty cache.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries: BTreeMap<String, CachedResponse> = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                ScrapeError::CacheFormat {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ScrapeError::CacheIo { path, source }),
        };
        debug!(path = ?path, entries = entries.len(), "opened response cache");
        Ok(Self { path, entries })
    }

    /// Requests differing in URL or user agent are cached separately.
    pub fn key(url: &str, user_agent: &str) -> String {
        format!("GET {url} [{user_agent}]")
    }

    pub fn get(&self, key: &str) -> Option<&CachedResponse> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, response: CachedResponse) -> Result<()> {
        self.entries.insert(key, response);
        self.persist()
    }

    /// Drops every entry and removes the backing file.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Self::clear_at(&self.path)
    }

    /// Removes the cache file at `path` without reading it, so a corrupt
    /// cache can still be emptied. A missing file is already clear.
    pub fn clear_at(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = ?path, "removed response cache"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ScrapeError::CacheIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let io_err = |source: io::Error| ScrapeError::CacheIo {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string(&self.entries).map_err(|source| {
            ScrapeError::CacheFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}
