use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of the transaction that performed a ledger write or delete.
///
/// Generated ids are 64 lowercase hex characters, the same shape as the
/// SHA-256 ids a peer assigns. Ids received from a host are accepted as-is
/// provided they are non-empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Generate a fresh id: the BLAKE3 digest of a UUIDv7.
    pub fn generate() -> Self {
        let seed = uuid::Uuid::now_v7();
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"sensorcc-tx-v1:");
        hasher.update(seed.as_bytes());
        Self(hex::encode(hasher.finalize().as_bytes()))
    }

    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidTxId("empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// First 8 characters, for log lines.
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.short_id())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
