use sensorcc_types::{LedgerTimestamp, TxId};

use crate::error::LedgerResult;
use crate::memory::InMemoryLedger;
use crate::traits::{ChaincodeStub, HistoryQueryIterator};

/// A single transaction context over an [`InMemoryLedger`].
///
/// Build one per invocation. Writes go straight to the ledger under this
/// context's transaction id and timestamp.
pub struct MockStub<'a> {
    ledger: &'a InMemoryLedger,
    function: String,
    args: Vec<String>,
    tx_id: TxId,
    timestamp: LedgerTimestamp,
}

impl<'a> MockStub<'a> {
    /// A context for `function(args..)` with a fresh tx id and the current time.
    pub fn new<I, S>(ledger: &'a InMemoryLedger, function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ledger,
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
            tx_id: TxId::generate(),
            timestamp: LedgerTimestamp::now(),
        }
    }

    /// A context from a raw argument vector whose first element names the
    /// function, the way invocations arrive on the wire. An empty vector
    /// yields an empty function name.
    pub fn from_raw_args(ledger: &'a InMemoryLedger, raw: Vec<String>) -> Self {
        let mut raw = raw.into_iter();
        let function = raw.next().unwrap_or_default();
        Self::new(ledger, function, raw)
    }

    /// Pin the transaction id and timestamp.
    pub fn with_tx(mut self, tx_id: TxId, timestamp: LedgerTimestamp) -> Self {
        self.tx_id = tx_id;
        self.timestamp = timestamp;
        self
    }
}

impl ChaincodeStub for MockStub<'_> {
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }

    fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> LedgerTimestamp {
        self.timestamp
    }

    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        Ok(self.ledger.get(key)?.unwrap_or_default())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.ledger.put(key, value, &self.tx_id, self.timestamp)
    }

    fn del_state(&mut self, key: &str) -> LedgerResult<()> {
        self.ledger.delete(key, &self.tx_id, self.timestamp)
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryQueryIterator + '_>> {
        Ok(Box::new(self.ledger.history_iterator(key)?))
    }
}
