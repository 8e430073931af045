//! Ledger boundary for the sensor chaincode.
//!
//! The chaincode never owns storage. Everything it needs from the host peer
//! is expressed here as traits, plus an in-memory substitute that stands in
//! for the peer in tests and in the local CLI:
//! - `ChaincodeStub` / `HistoryQueryIterator` trait boundaries
//! - `InMemoryLedger` world state with per-key append-only history
//! - `MockStub`, a single transaction context over an `InMemoryLedger`
//! - JSON snapshot persistence for the in-memory ledger

pub mod error;
pub mod iterator;
pub mod memory;
pub mod snapshot;
pub mod stub;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use iterator::InMemoryHistoryIterator;
pub use memory::InMemoryLedger;
pub use stub::MockStub;
pub use traits::{ChaincodeStub, HistoryQueryIterator};
