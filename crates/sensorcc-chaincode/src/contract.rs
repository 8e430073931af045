use sensorcc_ledger::ChaincodeStub;
use tracing::{debug, info};

use crate::error::ChaincodeResult;
use crate::function::Function;
use crate::response::Response;

/// Entry points the host calls for each transaction.
pub trait Chaincode {
    /// Called once when the chaincode is instantiated or upgraded.
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// Called for every transaction proposal.
    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}

/// The sensor reading contract. Stateless; one value serves every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SensorContract;

impl Chaincode for SensorContract {
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response {
        info!(tx = stub.tx_id().short_id(), "chaincode init");
        Response::success(Vec::new())
    }

    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let (function, args) = stub.function_and_parameters();
        let result = dispatch(&function, &args, stub);
        if let Err(e) = &result {
            debug!(function = %function, error = ?e, "invocation failed");
        }
        result.into()
    }
}

/// Route `function` to its handler. Unknown names fail with `No func`.
pub fn dispatch(
    function: &str,
    args: &[String],
    stub: &mut dyn ChaincodeStub,
) -> ChaincodeResult<Vec<u8>> {
    let function: Function = function.parse()?;
    debug!(
        function = function.name(),
        args = args.len(),
        tx = stub.tx_id().short_id(),
        "dispatching invocation"
    );
    (function.handler())(args, stub)
}
