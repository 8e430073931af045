use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sensorcc_types::KeyModification;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::HistoryQueryIterator;

/// History cursor handed out by [`crate::InMemoryLedger`].
///
/// Holds a copy of the chain taken when the cursor was opened, so writes
/// made afterwards are not observed. The ledger counts cursors that have
/// been opened but not closed; dropping an unclosed cursor leaves it counted.
pub struct InMemoryHistoryIterator {
    entries: std::vec::IntoIter<KeyModification>,
    closed: bool,
    open: Arc<AtomicUsize>,
}

impl InMemoryHistoryIterator {
    pub(crate) fn new(entries: Vec<KeyModification>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            entries: entries.into_iter(),
            closed: false,
            open,
        }
    }

    /// Entries not yet returned.
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl HistoryQueryIterator for InMemoryHistoryIterator {
    fn has_next(&self) -> bool {
        !self.closed && !self.entries.as_slice().is_empty()
    }

    fn next_entry(&mut self) -> LedgerResult<KeyModification> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        self.entries.next().ok_or(LedgerError::IteratorExhausted)
    }

    fn close(&mut self) -> LedgerResult<()> {
        if !self.closed {
            self.closed = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
