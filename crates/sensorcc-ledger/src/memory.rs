use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sensorcc_types::{KeyModification, LedgerTimestamp, TxId};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::iterator::InMemoryHistoryIterator;

/// In-memory ledger for tests, local runs, and embedding.
///
/// Keeps the live world state and, per key, the append-only chain of every
/// write and delete ever applied. No consensus, endorsement, or commit
/// phase: a write is visible as soon as it returns.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
    open_iterators: Arc<AtomicUsize>,
}

#[derive(Default)]
pub(crate) struct LedgerState {
    pub(crate) world: BTreeMap<String, Vec<u8>>,
    pub(crate) history: HashMap<String, Vec<KeyModification>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::from_state(LedgerState::default())
    }

    pub(crate) fn from_state(state: LedgerState) -> Self {
        Self {
            inner: RwLock::new(state),
            open_iterators: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current value under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.read()?.world.get(key).cloned())
    }

    /// Write `value` under `key` and append it to the key's history.
    pub fn put(
        &self,
        key: &str,
        value: &[u8],
        tx_id: &TxId,
        timestamp: LedgerTimestamp,
    ) -> LedgerResult<()> {
        validate_key(key)?;
        let mut state = self.write()?;
        state.world.insert(key.to_string(), value.to_vec());
        state
            .history
            .entry(key.to_string())
            .or_default()
            .push(KeyModification::write(tx_id.clone(), timestamp, value.to_vec()));
        debug!(key, tx = tx_id.short_id(), bytes = value.len(), "put state");
        Ok(())
    }

    /// Remove `key` from the world state and append a deletion marker.
    ///
    /// Deleting an absent key is not an error; the marker is still recorded.
    pub fn delete(&self, key: &str, tx_id: &TxId, timestamp: LedgerTimestamp) -> LedgerResult<()> {
        validate_key(key)?;
        let mut state = self.write()?;
        let existed = state.world.remove(key).is_some();
        state
            .history
            .entry(key.to_string())
            .or_default()
            .push(KeyModification::deletion(tx_id.clone(), timestamp));
        debug!(key, tx = tx_id.short_id(), existed, "delete state");
        Ok(())
    }

    /// Every recorded version of `key`, oldest first.
    pub fn history(&self, key: &str) -> LedgerResult<Vec<KeyModification>> {
        validate_key(key)?;
        Ok(self.read()?.history.get(key).cloned().unwrap_or_default())
    }

    /// Open a cursor over the history of `key`.
    pub fn history_iterator(&self, key: &str) -> LedgerResult<InMemoryHistoryIterator> {
        let entries = self.history(key)?;
        Ok(InMemoryHistoryIterator::new(
            entries,
            Arc::clone(&self.open_iterators),
        ))
    }

    /// Keys currently present in the world state, sorted.
    pub fn keys(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read()?.world.keys().cloned().collect())
    }

    /// Number of history cursors opened and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    pub(crate) fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_key(key: &str) -> LedgerResult<()> {
    if key.is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HistoryQueryIterator;

    fn tx(id: &str) -> TxId {
        TxId::new(id).unwrap()
    }

    #[test]
    fn put_then_get() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", b"one", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        assert_eq!(ledger.get("A").unwrap(), Some(b"one".to_vec()));
        assert_eq!(ledger.get("B").unwrap(), None);
    }

    #[test]
    fn overwrite_appends_history() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", b"one", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        ledger
            .put("A", b"two", &tx("t2"), LedgerTimestamp::from_secs(2))
            .unwrap();

        assert_eq!(ledger.get("A").unwrap(), Some(b"two".to_vec()));
        let history = ledger.history("A").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value(), b"one");
        assert_eq!(history[1].tx_id().as_str(), "t2");
    }

    #[test]
    fn delete_removes_state_and_records_marker() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", b"one", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        ledger
            .delete("A", &tx("t2"), LedgerTimestamp::from_secs(2))
            .unwrap();

        assert_eq!(ledger.get("A").unwrap(), None);
        let history = ledger.history("A").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[1].is_delete());
        assert!(history[1].value().is_empty());
    }

    #[test]
    fn delete_of_absent_key_still_records_marker() {
        let ledger = InMemoryLedger::new();
        ledger
            .delete("ghost", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        let history = ledger.history("ghost").unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_delete());
    }

    #[test]
    fn empty_key_is_rejected() {
        let ledger = InMemoryLedger::new();
        let ts = LedgerTimestamp::from_secs(1);
        assert_eq!(ledger.get("").unwrap_err(), LedgerError::EmptyKey);
        assert_eq!(
            ledger.put("", b"x", &tx("t"), ts).unwrap_err(),
            LedgerError::EmptyKey
        );
        assert_eq!(ledger.delete("", &tx("t"), ts).unwrap_err(), LedgerError::EmptyKey);
        assert!(ledger.history_iterator("").is_err());
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn iterator_snapshot_ignores_later_writes() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", b"one", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();

        let mut iter = ledger.history_iterator("A").unwrap();
        ledger
            .put("A", b"two", &tx("t2"), LedgerTimestamp::from_secs(2))
            .unwrap();

        assert_eq!(iter.remaining(), 1);
        assert_eq!(iter.next_entry().unwrap().value(), b"one");
        assert!(!iter.has_next());
        iter.close().unwrap();
    }

    #[test]
    fn open_iterators_tracks_unclosed_cursors() {
        let ledger = InMemoryLedger::new();
        let mut a = ledger.history_iterator("A").unwrap();
        let b = ledger.history_iterator("B").unwrap();
        assert_eq!(ledger.open_iterators(), 2);

        a.close().unwrap();
        assert_eq!(ledger.open_iterators(), 1);
        drop(b);
        assert_eq!(ledger.open_iterators(), 1);
    }

    #[test]
    fn keys_lists_live_state_only() {
        let ledger = InMemoryLedger::new();
        let ts = LedgerTimestamp::from_secs(1);
        ledger.put("b", b"1", &tx("t1"), ts).unwrap();
        ledger.put("a", b"2", &tx("t2"), ts).unwrap();
        ledger.put("c", b"3", &tx("t3"), ts).unwrap();
        ledger.delete("c", &tx("t4"), ts).unwrap();

        assert_eq!(ledger.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
