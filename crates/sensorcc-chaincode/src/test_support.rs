//! A stub wrapper that injects ledger failures.

use sensorcc_ledger::{ChaincodeStub, HistoryQueryIterator, LedgerError, LedgerResult, MockStub};
use sensorcc_types::{KeyModification, LedgerTimestamp, TxId};

#[derive(Default)]
pub(crate) struct Faults {
    pub get: bool,
    pub put: bool,
    pub del: bool,
    pub history: bool,
    /// Fail `next_entry` once this many entries have been served.
    pub next_after: Option<usize>,
}

pub(crate) struct FaultyStub<'a> {
    inner: MockStub<'a>,
    faults: Faults,
}

impl<'a> FaultyStub<'a> {
    pub fn new(inner: MockStub<'a>, faults: Faults) -> Self {
        Self { inner, faults }
    }
}

fn injected(op: &str) -> LedgerError {
    LedgerError::Unavailable(format!("injected {op} failure"))
}

impl ChaincodeStub for FaultyStub<'_> {
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        self.inner.function_and_parameters()
    }

    fn tx_id(&self) -> &TxId {
        self.inner.tx_id()
    }

    fn tx_timestamp(&self) -> LedgerTimestamp {
        self.inner.tx_timestamp()
    }

    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        if self.faults.get {
            return Err(injected("get"));
        }
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        if self.faults.put {
            return Err(injected("put"));
        }
        self.inner.put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> LedgerResult<()> {
        if self.faults.del {
            return Err(injected("del"));
        }
        self.inner.del_state(key)
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryQueryIterator + '_>> {
        if self.faults.history {
            return Err(injected("history"));
        }
        Ok(Box::new(FaultyIterator {
            inner: self.inner.history_for_key(key)?,
            served: 0,
            fail_after: self.faults.next_after,
        }))
    }
}

struct FaultyIterator<'a> {
    inner: Box<dyn HistoryQueryIterator + 'a>,
    served: usize,
    fail_after: Option<usize>,
}

impl HistoryQueryIterator for FaultyIterator<'_> {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn next_entry(&mut self) -> LedgerResult<KeyModification> {
        if self.fail_after == Some(self.served) {
            return Err(injected("next"));
        }
        self.served += 1;
        self.inner.next_entry()
    }

    fn close(&mut self) -> LedgerResult<()> {
        self.inner.close()
    }
}
