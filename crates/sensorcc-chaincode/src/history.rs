//! Rendering of a key's history chain as a JSON array.
//!
//! Element shape:
//! `{"txid":"..","timestamp":"<seconds>","value":<payload>,"isDelete":false}`
//!
//! `timestamp` is a decimal string, not a number. `value` embeds the stored
//! payload verbatim when it is valid JSON (a saved record appears as an
//! object), falls back to a JSON string otherwise, and is `""` for deletions.

use sensorcc_ledger::{ChaincodeStub, HistoryQueryIterator};
use sensorcc_types::KeyModification;
use serde::Serialize;
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::error::{ChaincodeError, ChaincodeResult};

/// Owns an open history iterator and closes it when dropped, on every exit
/// path including early error returns.
struct HistoryCursor<'a> {
    iter: Box<dyn HistoryQueryIterator + 'a>,
}

impl<'a> HistoryCursor<'a> {
    fn open(stub: &'a dyn ChaincodeStub, key: &str) -> ChaincodeResult<Self> {
        let iter = stub.history_for_key(key).map_err(|e| {
            warn!(key, error = %e, "history iterator unavailable");
            ChaincodeError::HistoryUnavailable(e)
        })?;
        Ok(Self { iter })
    }
}

impl Drop for HistoryCursor<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.iter.close() {
            warn!(error = %e, "failed to close history iterator");
        }
    }
}

#[derive(Serialize)]
struct HistoryItem {
    txid: String,
    timestamp: String,
    value: HistoryValue,
    #[serde(rename = "isDelete")]
    is_delete: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum HistoryValue {
    Json(Box<RawValue>),
    Text(String),
}

impl HistoryValue {
    fn of(entry: &KeyModification) -> Self {
        if entry.is_delete() {
            return Self::Text(String::new());
        }
        match std::str::from_utf8(entry.value()) {
            Ok(text) => match RawValue::from_string(text.to_owned()) {
                Ok(raw) => Self::Json(raw),
                Err(_) => Self::Text(text.to_owned()),
            },
            Err(e) => {
                // JSON strings cannot hold arbitrary bytes.
                warn!(
                    tx = entry.tx_id().short_id(),
                    error = %e,
                    "history payload is not UTF-8, rendering lossily"
                );
                Self::Text(String::from_utf8_lossy(entry.value()).into_owned())
            }
        }
    }
}

impl From<&KeyModification> for HistoryItem {
    fn from(entry: &KeyModification) -> Self {
        Self {
            txid: entry.tx_id().as_str().to_string(),
            timestamp: entry.timestamp().seconds.to_string(),
            value: HistoryValue::of(entry),
            is_delete: entry.is_delete(),
        }
    }
}

/// Drain the history of `key` into a JSON array, oldest first.
///
/// Any failure to open or advance the iterator fails the whole call; no
/// partial array is ever returned.
pub fn render_history(stub: &dyn ChaincodeStub, key: &str) -> ChaincodeResult<Vec<u8>> {
    let mut cursor = HistoryCursor::open(stub, key)?;

    let mut items = Vec::new();
    while cursor.iter.has_next() {
        let entry = cursor.iter.next_entry()?;
        items.push(HistoryItem::from(&entry));
    }
    debug!(key, entries = items.len(), "history rendered");

    serde_json::to_vec(&items).map_err(|e| ChaincodeError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Faults, FaultyStub};
    use sensorcc_ledger::{InMemoryLedger, MockStub};
    use sensorcc_types::{LedgerTimestamp, TxId};
    use serde_json::{json, Value};

    fn tx(id: &str) -> TxId {
        TxId::new(id).unwrap()
    }

    fn seeded() -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        ledger
            .put(
                "A",
                br#"{"temp":"10","humidity":"55"}"#,
                &tx("t1"),
                LedgerTimestamp::new(1_700_000_000, 250),
            )
            .unwrap();
        ledger
            .delete("A", &tx("t2"), LedgerTimestamp::from_secs(1_700_000_060))
            .unwrap();
        ledger
    }

    fn stub(ledger: &InMemoryLedger) -> MockStub<'_> {
        MockStub::new(ledger, "getHistoryForKey", ["A"])
    }

    #[test]
    fn renders_entries_in_ledger_order() {
        let ledger = seeded();
        let bytes = render_history(&stub(&ledger), "A").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            parsed,
            json!([
                {
                    "txid": "t1",
                    "timestamp": "1700000000",
                    "value": {"temp": "10", "humidity": "55"},
                    "isDelete": false
                },
                {
                    "txid": "t2",
                    "timestamp": "1700000060",
                    "value": "",
                    "isDelete": true
                }
            ])
        );
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn embeds_stored_json_verbatim() {
        let ledger = seeded();
        let bytes = render_history(&stub(&ledger), "A").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#""value":{"temp":"10","humidity":"55"}"#));
    }

    #[test]
    fn non_json_payload_becomes_string() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", b"plain \"text\"", &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        let bytes = render_history(&stub(&ledger), "A").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed[0]["value"], json!("plain \"text\""));
    }

    #[test]
    fn utf8_text_payload_is_kept_exactly() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", "21.5 °C, {open".as_bytes(), &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        let bytes = render_history(&stub(&ledger), "A").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed[0]["value"], json!("21.5 °C, {open"));
    }

    #[test]
    fn non_utf8_payload_is_replaced_lossily() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("A", &[0xff, 0xfe, b'x'], &tx("t1"), LedgerTimestamp::from_secs(1))
            .unwrap();
        let bytes = render_history(&stub(&ledger), "A").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed[0]["value"], json!("\u{fffd}\u{fffd}x"));
        assert_eq!(parsed[0]["isDelete"], false);
    }

    #[test]
    fn unknown_key_renders_empty_array() {
        let ledger = InMemoryLedger::new();
        let bytes = render_history(&stub(&ledger), "nothing").unwrap();
        assert_eq!(bytes, b"[]");
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn repeated_reads_are_byte_identical() {
        let ledger = seeded();
        let first = render_history(&stub(&ledger), "A").unwrap();
        let second = render_history(&stub(&ledger), "A").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn acquisition_failure_uses_fixed_message() {
        let ledger = seeded();
        let faulty = FaultyStub::new(
            stub(&ledger),
            Faults {
                history: true,
                ..Faults::default()
            },
        );
        let err = render_history(&faulty, "A").unwrap_err();
        assert_eq!(err.to_string(), "getHistoryForKey error");
    }

    #[test]
    fn advance_failure_discards_partial_output_and_closes() {
        let ledger = seeded();
        let faulty = FaultyStub::new(
            stub(&ledger),
            Faults {
                next_after: Some(1),
                ..Faults::default()
            },
        );
        let err = render_history(&faulty, "A").unwrap_err();

        assert_eq!(err.to_string(), "ledger unavailable: injected next failure");
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn failure_on_first_entry_still_closes() {
        let ledger = seeded();
        let faulty = FaultyStub::new(
            stub(&ledger),
            Faults {
                next_after: Some(0),
                ..Faults::default()
            },
        );
        assert!(render_history(&faulty, "A").is_err());
        assert_eq!(ledger.open_iterators(), 0);
    }
}
