//! The host-facing boundary the chaincode is written against.

use sensorcc_types::{KeyModification, LedgerTimestamp, TxId};

use crate::error::LedgerResult;

/// Sequential cursor over the history chain of a single key.
///
/// Entries come out in ledger order, oldest first. The cursor only moves
/// forward and cannot be rewound. Callers must `close` it once done; after
/// that every `next_entry` fails with `LedgerError::IteratorClosed`.
pub trait HistoryQueryIterator {
    /// Returns `true` while at least one entry remains.
    fn has_next(&self) -> bool;

    /// Advance and return the next entry.
    fn next_entry(&mut self) -> LedgerResult<KeyModification>;

    /// Release the cursor. Closing twice is a no-op.
    fn close(&mut self) -> LedgerResult<()>;
}

/// One transaction's view of the ledger, supplied by the host per invocation.
///
/// Mutating calls take `&mut self`: the chaincode holds the stub exclusively
/// for the duration of a single invocation and never stores it.
pub trait ChaincodeStub {
    /// The invoked function name and its positional arguments.
    fn function_and_parameters(&self) -> (String, Vec<String>);

    /// Id of the transaction this invocation runs in.
    fn tx_id(&self) -> &TxId;

    /// Timestamp the client assigned to this transaction.
    fn tx_timestamp(&self) -> LedgerTimestamp;

    /// Current value under `key`. Empty when the key was never set or has
    /// been deleted.
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>>;

    /// Insert or overwrite `key`.
    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Remove `key` from the world state. History keeps a deletion marker.
    fn del_state(&mut self, key: &str) -> LedgerResult<()>;

    /// Open a cursor over every recorded version of `key`.
    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryQueryIterator + '_>>;
}
