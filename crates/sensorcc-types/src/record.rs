use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A temperature/humidity reading, the value stored under a ledger key.
///
/// Both fields are kept as the caller supplied them; the chaincode never
/// interprets the measurements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub temp: String,
    pub humidity: String,
}

impl Record {
    pub fn new(temp: impl Into<String>, humidity: impl Into<String>) -> Self {
        Self {
            temp: temp.into(),
            humidity: humidity.into(),
        }
    }

    /// Encode as `{"temp":..,"humidity":..}`.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}
