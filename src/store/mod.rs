mod posts;
mod tokens;
mod users;

use parking_lot::RwLock;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{Result, StoreError};
use crate::snapshot::Snapshot;

// ============================================================================
// DOCUMENT STORE - Single-file JSON database shared across request threads
// ============================================================================
/// Embedded document store backed by one JSON file.
///
/// Every operation opens, reads, and (for writes) rewrites the whole
/// file; no handle or cache outlives a single call, so dropping the
/// store needs no teardown. Concurrency is mediated by one
/// reader/writer lock owned by this instance: reads share it for the
/// duration of load + deserialize, writes hold it exclusively across
/// the entire load-mutate-persist cycle. Two stores opened on
/// different files are fully independent.
///
/// The lock does not reach across processes; a deployment gets exactly
/// one store instance per backing file.
pub struct DocumentStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl DocumentStore {
    /// Opens the store at `path`, creating the file with an empty
    /// snapshot if it does not exist yet. An existing file is left
    /// untouched until the first operation reads it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = DocumentStore {
            path: path.into(),
            lock: RwLock::new(()),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    fn ensure_exists(&self) -> Result<()> {
        // Probe with a full read so a present-but-unreadable file fails
        // here instead of on the first real operation.
        match fs::read(&self.path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let _guard = self.lock.write();
                self.persist(&Snapshot::new())?;
                debug!("created empty database at {}", self.path.display());
                Ok(())
            }
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Runs `op` against the current snapshot under the shared lock and
    /// returns whatever it produces. `op` gets a read-only view; record
    /// accessors clone what they hand back to the caller.
    pub(crate) fn read<T>(&self, op: impl FnOnce(&Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.read();
        let snapshot = self.load()?;
        op(&snapshot)
    }

    /// Runs `op` under the exclusive lock and persists the snapshot it
    /// mutated. The lock spans the whole load-mutate-persist cycle: two
    /// writers can never observe the same id counter or index state.
    /// When `op` returns an error nothing is written, so a failed
    /// mutation leaves the file exactly as it was.
    pub(crate) fn write<T>(&self, op: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock.write();
        let mut snapshot = self.load()?;
        let output = op(&mut snapshot)?;
        self.persist(&snapshot)?;
        Ok(output)
    }

    fn load(&self) -> Result<Snapshot> {
        let data = fs::read(&self.path)?;
        let mut snapshot: Snapshot = serde_json::from_slice(&data)?;
        snapshot.restore_counters();
        Ok(snapshot)
    }

    /// Serializes the full snapshot in memory, writes it to a sibling
    /// temp file, and renames that over the target. A failure while
    /// serializing never touches the file; a crash mid-write leaves the
    /// old snapshot intact rather than a truncated one.
    fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let data = serde_json::to_vec(snapshot)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        debug!("persisted snapshot ({} bytes)", data.len());
        Ok(())
    }
}
