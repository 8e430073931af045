//! Foundation types for the sensor chaincode.
//!
//! Every other crate in the workspace depends on `sensorcc-types`.
//!
//! # Key Types
//!
//! - [`Record`] -- the temp/humidity reading stored under a ledger key
//! - [`TxId`] -- identifier of the transaction that touched a key
//! - [`LedgerTimestamp`] -- seconds/nanos transaction timestamp
//! - [`KeyModification`] -- one entry in a key's history chain

pub mod error;
pub mod history;
pub mod record;
pub mod temporal;
pub mod txid;

pub use error::TypeError;
pub use history::KeyModification;
pub use record::Record;
pub use temporal::LedgerTimestamp;
pub use txid::TxId;
