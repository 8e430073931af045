//! JSON snapshot persistence for [`InMemoryLedger`].
//!
//! Byte values are hex-encoded. Snapshots are written to a temporary file in
//! the destination directory and renamed into place, so a crash never leaves
//! a half-written snapshot behind.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

use sensorcc_types::{KeyModification, LedgerTimestamp, TxId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::memory::{InMemoryLedger, LedgerState};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    keys: Vec<SnapshotKey>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotKey {
    key: String,
    /// Live value, absent when the key is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    history: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    tx_id: String,
    seconds: i64,
    nanos: i32,
    #[serde(default)]
    value: String,
    is_delete: bool,
}

impl InMemoryLedger {
    /// Write the full ledger (world state and history) to `path`.
    pub fn save_snapshot(&self, path: &Path) -> LedgerResult<()> {
        let file = {
            let state = self.read()?;
            to_snapshot(&state)
        };
        let encoded = serde_json::to_vec_pretty(&file)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| LedgerError::Io(e.error.to_string()))?;

        debug!(path = %path.display(), keys = file.keys.len(), "ledger snapshot saved");
        Ok(())
    }

    /// Load a ledger from `path`. A missing file yields an empty ledger.
    pub fn load_snapshot(path: &Path) -> LedgerResult<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger snapshot, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let file: SnapshotFile = serde_json::from_slice(&bytes)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        if file.version != SNAPSHOT_VERSION {
            return Err(LedgerError::UnsupportedSnapshot {
                found: file.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let keys = file.keys.len();
        let state = from_snapshot(file)?;
        debug!(path = %path.display(), keys, "ledger snapshot loaded");
        Ok(Self::from_state(state))
    }
}

fn to_snapshot(state: &LedgerState) -> SnapshotFile {
    let mut names: Vec<&String> = state.history.keys().chain(state.world.keys()).collect();
    names.sort();
    names.dedup();

    let keys = names
        .into_iter()
        .map(|key| SnapshotKey {
            key: key.clone(),
            value: state.world.get(key).map(hex::encode),
            history: state
                .history
                .get(key)
                .map(|chain| chain.iter().map(to_entry).collect())
                .unwrap_or_default(),
        })
        .collect();

    SnapshotFile {
        version: SNAPSHOT_VERSION,
        keys,
    }
}

fn to_entry(modification: &KeyModification) -> SnapshotEntry {
    let timestamp = modification.timestamp();
    SnapshotEntry {
        tx_id: modification.tx_id().as_str().to_string(),
        seconds: timestamp.seconds,
        nanos: timestamp.nanos,
        value: hex::encode(modification.value()),
        is_delete: modification.is_delete(),
    }
}

fn from_snapshot(file: SnapshotFile) -> LedgerResult<LedgerState> {
    let mut world = BTreeMap::new();
    let mut history = HashMap::new();

    for entry in file.keys {
        if entry.key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        if let Some(value) = entry.value {
            world.insert(entry.key.clone(), decode_hex(&value)?);
        }
        let chain = entry
            .history
            .into_iter()
            .map(from_entry)
            .collect::<LedgerResult<Vec<_>>>()?;
        if !chain.is_empty() {
            history.insert(entry.key, chain);
        }
    }

    Ok(LedgerState { world, history })
}

fn from_entry(entry: SnapshotEntry) -> LedgerResult<KeyModification> {
    let tx_id = TxId::new(entry.tx_id).map_err(|e| LedgerError::Serialization(e.to_string()))?;
    let timestamp = LedgerTimestamp::new(entry.seconds, entry.nanos);
    if entry.is_delete {
        if !entry.value.is_empty() {
            return Err(LedgerError::Serialization(format!(
                "deletion by {tx_id} carries a payload"
            )));
        }
        Ok(KeyModification::deletion(tx_id, timestamp))
    } else {
        Ok(KeyModification::write(tx_id, timestamp, decode_hex(&entry.value)?))
    }
}

fn decode_hex(value: &str) -> LedgerResult<Vec<u8>> {
    hex::decode(value).map_err(|e| LedgerError::Serialization(e.to_string()))
}
