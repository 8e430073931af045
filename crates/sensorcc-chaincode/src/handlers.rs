//! The four operations. Each checks its arity before touching the ledger,
//! so a malformed call never mutates state.

use sensorcc_ledger::ChaincodeStub;
use sensorcc_types::Record;
use tracing::{debug, warn};

use crate::error::{ChaincodeError, ChaincodeResult};
use crate::function::Function;

/// `save(key, temp, humidity)`: store a [`Record`] under `key` and return
/// the transaction id.
pub fn save(args: &[String], stub: &mut dyn ChaincodeStub) -> ChaincodeResult<Vec<u8>> {
    let [key, temp, humidity] = args else {
        return Err(Function::Save.arity_error(args));
    };
    let value = Record::new(temp.as_str(), humidity.as_str()).to_json_bytes()?;
    stub.put_state(key, &value)?;
    debug!(key = %key, tx = stub.tx_id().short_id(), "record saved");
    Ok(stub.tx_id().as_bytes().to_vec())
}

/// `query(key)`: the raw stored bytes, empty if the key is unset.
///
/// A failed read is logged and answered with an empty payload.
pub fn query(args: &[String], stub: &mut dyn ChaincodeStub) -> ChaincodeResult<Vec<u8>> {
    let [key] = args else {
        return Err(Function::Query.arity_error(args));
    };
    match stub.get_state(key) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "state read failed, answering empty");
            Ok(Vec::new())
        }
    }
}

/// `del(key)`: remove `key` and return the transaction id.
pub fn delete(args: &[String], stub: &mut dyn ChaincodeStub) -> ChaincodeResult<Vec<u8>> {
    let [key] = args else {
        return Err(Function::Delete.arity_error(args));
    };
    if let Err(e) = stub.del_state(key) {
        warn!(key = %key, error = %e, "delete failed");
        return Err(ChaincodeError::DeleteFailed(e));
    }
    debug!(key = %key, tx = stub.tx_id().short_id(), "record deleted");
    Ok(stub.tx_id().as_bytes().to_vec())
}

/// `getHistoryForKey(key)`: every version of `key` as a JSON array.
pub fn history(args: &[String], stub: &mut dyn ChaincodeStub) -> ChaincodeResult<Vec<u8>> {
    let [key] = args else {
        return Err(Function::GetHistoryForKey.arity_error(args));
    };
    crate::history::render_history(&*stub, key)
}
