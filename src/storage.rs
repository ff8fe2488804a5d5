use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::employees::repo_types::{Roster, StoredRecord};

/// Where the roster lives. Implementations always read and write the
/// whole roster at once.
pub trait RecordStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Roster>;
    fn save(&self, roster: &Roster) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a map of employee records: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode roster: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SeqMeta {
    last_seq: u32,
}

/// Pretty-printed JSON document mapping employee id to record, with the id
/// counter kept in a `<stem>.meta.json` sidecar.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn meta_path(&self) -> PathBuf {
        self.path.with_extension("meta.json")
    }

    /// `None` when there is no document at all. Unparseable text loads as an
    /// empty roster; individual records are only typed when first used.
    fn read_employees(&self) -> anyhow::Result<Option<BTreeMap<String, StoredRecord>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no backing file yet; starting empty");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                }
                .into())
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "backing file is not valid JSON; starting empty");
                return Ok(Some(BTreeMap::new()));
            }
        };

        let employees: BTreeMap<String, StoredRecord> =
            serde_json::from_value(value).map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                source: e,
            })?;
        for (key, record) in &employees {
            if matches!(record, StoredRecord::Unreadable(_)) {
                warn!(path = %self.path.display(), key = %key, "record has the wrong shape; keeping it as-is");
            }
        }
        Ok(Some(employees))
    }

    fn read_last_seq(&self) -> u32 {
        fs::read_to_string(self.meta_path())
            .ok()
            .and_then(|raw| serde_json::from_str::<SeqMeta>(&raw).ok())
            .map(|meta| meta.last_seq)
            .unwrap_or(0)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Roster> {
        // the counter describes the document; without one it starts over
        let (employees, last_seq) = match self.read_employees()? {
            Some(employees) => (employees, self.read_last_seq()),
            None => (BTreeMap::new(), 0),
        };
        debug!(path = %self.path.display(), records = employees.len(), last_seq, "roster loaded");
        Ok(Roster {
            employees,
            last_seq,
        })
    }

    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        let body = serde_json::to_string_pretty(&roster.employees).map_err(StoreError::Encode)?;
        write_atomically(&self.path, body.as_bytes())?;

        let meta = serde_json::to_string_pretty(&SeqMeta {
            last_seq: roster.last_seq,
        })
        .map_err(StoreError::Encode)?;
        write_atomically(&self.meta_path(), meta.as_bytes())?;

        debug!(path = %self.path.display(), records = roster.count(), "roster saved");
        Ok(())
    }
}

/// Writes into a temp file next to `path`, then renames it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path)
        .map_err(|e| io_err(e.error))
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

/// Roster held in memory only.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    roster: std::sync::Mutex<Roster>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster: std::sync::Mutex::new(roster),
        }
    }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Roster> {
        let guard = self
            .roster
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        let mut guard = self
            .roster
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        *guard = roster.clone();
        Ok(())
    }
}
