//! Persisted record set: one JSON document holding every offer from the
//! latest scrape. Each save replaces the previous set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::JobOffer;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no scrape results at {0:?}, run `scrape` first")]
    NotFound(PathBuf),

    #[error("record set I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("record set at {path:?} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes `offers` to `path`, creating the parent directory if needed and
/// overwriting whatever was there.
pub fn save_records(path: &Path, offers: &[JobOffer]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(offers).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(count = offers.len(), path = ?path, "saved record set");
    Ok(())
}

/// Reads the record set at `path`. A missing file is [`StoreError::NotFound`].
pub fn load_records(path: &Path) -> Result<Vec<JobOffer>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let offers: Vec<JobOffer> = serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(count = offers.len(), path = ?path, "loaded record set");
    Ok(offers)
}
