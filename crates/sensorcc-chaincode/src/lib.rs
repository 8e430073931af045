//! Sensor reading chaincode.
//!
//! Four operations over a host-supplied ledger, dispatched by function name:
//!
//! | Function           | Args                    | Payload on success          |
//! |--------------------|-------------------------|-----------------------------|
//! | `save`             | key, temp, humidity     | transaction id              |
//! | `query`            | key                     | stored value, maybe empty   |
//! | `del`              | key                     | transaction id              |
//! | `getHistoryForKey` | key                     | JSON array of key versions  |
//!
//! The chaincode keeps no state of its own. Every invocation borrows a
//! [`ChaincodeStub`] for its duration and reports through a [`Response`].

pub mod contract;
pub mod error;
pub mod function;
pub mod handlers;
pub mod history;
pub mod response;

#[cfg(test)]
pub(crate) mod test_support;

pub use contract::{dispatch, Chaincode, SensorContract};
pub use error::{ChaincodeError, ChaincodeResult};
pub use function::{Function, Handler};
pub use response::Response;

pub use sensorcc_ledger::ChaincodeStub;
pub use sensorcc_types::Record;
