use crate::temporal::LedgerTimestamp;
use crate::txid::TxId;

/// One version in a key's history chain.
///
/// Entries are immutable once recorded. A deletion entry never carries a
/// payload; the constructors are the only way to build one, so this holds
/// for every value in circulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyModification {
    tx_id: TxId,
    timestamp: LedgerTimestamp,
    value: Vec<u8>,
    is_delete: bool,
}

impl KeyModification {
    /// A write of `value` by transaction `tx_id`.
    pub fn write(tx_id: TxId, timestamp: LedgerTimestamp, value: Vec<u8>) -> Self {
        Self {
            tx_id,
            timestamp,
            value,
            is_delete: false,
        }
    }

    /// A deletion marker recorded by transaction `tx_id`.
    pub fn deletion(tx_id: TxId, timestamp: LedgerTimestamp) -> Self {
        Self {
            tx_id,
            timestamp,
            value: Vec::new(),
            is_delete: true,
        }
    }

    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    pub fn timestamp(&self) -> LedgerTimestamp {
        self.timestamp
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn is_delete(&self) -> bool {
        self.is_delete
    }
}
