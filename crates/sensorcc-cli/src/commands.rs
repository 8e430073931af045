use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use sensorcc_chaincode::{Chaincode, Function, Response, SensorContract};
use sensorcc_ledger::{ChaincodeStub, InMemoryLedger, MockStub};
use sensorcc_types::TxId;
use serde_json::{json, Value};

use crate::cli::*;
use crate::config::PeerConfig;

/// Result of one transaction against the local ledger.
struct Outcome {
    function: String,
    tx_id: TxId,
    response: Response,
}

pub fn run_command(cli: Cli, config: &PeerConfig) -> anyhow::Result<ExitCode> {
    let outcome = match cli.command {
        Command::Config => return cmd_config(config),
        Command::Init => init(config)?,
        Command::Invoke(args) => invoke(config, args.function, args.args)?,
        Command::Save(args) => invoke(
            config,
            Function::Save.name().into(),
            vec![args.key, args.temp, args.humidity],
        )?,
        Command::Query(args) => invoke(config, Function::Query.name().into(), vec![args.key])?,
        Command::Del(args) => invoke(config, Function::Delete.name().into(), vec![args.key])?,
        Command::History(args) => invoke(
            config,
            Function::GetHistoryForKey.name().into(),
            vec![args.key],
        )?,
    };

    match cli.format {
        OutputFormat::Text => print_text(&outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&outcome))?),
    }

    Ok(if outcome.response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn open_ledger(config: &PeerConfig) -> anyhow::Result<InMemoryLedger> {
    InMemoryLedger::load_snapshot(&config.ledger_path)
        .with_context(|| format!("loading ledger {}", config.ledger_path.display()))
}

fn init(config: &PeerConfig) -> anyhow::Result<Outcome> {
    let ledger = open_ledger(config)?;
    let mut stub = MockStub::new(&ledger, "init", Vec::<String>::new());
    let response = SensorContract.init(&mut stub);
    tracing::info!(
        channel = %config.channel,
        chaincode = %config.chaincode_name,
        "chaincode instantiated"
    );
    Ok(Outcome {
        function: "init".into(),
        tx_id: stub.tx_id().clone(),
        response,
    })
}

/// Run `function(args)` in a fresh transaction and persist the ledger if the
/// call succeeded and changed state.
fn invoke(config: &PeerConfig, function: String, args: Vec<String>) -> anyhow::Result<Outcome> {
    let ledger = open_ledger(config)?;
    let mut raw = Vec::with_capacity(args.len() + 1);
    raw.push(function.clone());
    raw.extend(args);
    let mut stub = MockStub::from_raw_args(&ledger, raw);
    let response = SensorContract.invoke(&mut stub);
    let tx_id = stub.tx_id().clone();

    let mutating = function
        .parse::<Function>()
        .is_ok_and(|f| f.is_mutating());
    if response.is_ok() && mutating {
        ledger
            .save_snapshot(&config.ledger_path)
            .with_context(|| format!("saving ledger {}", config.ledger_path.display()))?;
    }

    Ok(Outcome {
        function,
        tx_id,
        response,
    })
}

fn print_text(outcome: &Outcome) {
    let response = &outcome.response;
    if !response.is_ok() {
        eprintln!(
            "{} {} {}: {}",
            "✗".red().bold(),
            response.status.to_string().red(),
            outcome.function.bold(),
            response.message
        );
        return;
    }

    println!(
        "{} {} {} (tx {})",
        "✓".green().bold(),
        response.status.to_string().green(),
        outcome.function.bold(),
        outcome.tx_id.short_id().yellow()
    );

    if outcome.function == Function::GetHistoryForKey.name() {
        print_history(&response.payload);
    } else if !response.payload.is_empty() {
        println!("{}", response.payload_str());
    }
}

fn print_history(payload: &[u8]) {
    let Ok(entries) = serde_json::from_slice::<Vec<Value>>(payload) else {
        println!("{}", String::from_utf8_lossy(payload));
        return;
    };
    if entries.is_empty() {
        println!("No history.");
        return;
    }
    for entry in &entries {
        let txid = entry["txid"].as_str().unwrap_or_default();
        let when = entry["timestamp"]
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "?".into());
        let short = txid.get(..8).unwrap_or(txid);
        if entry["isDelete"].as_bool().unwrap_or(false) {
            println!("  {}  {}  {}", short.yellow(), when.dimmed(), "deleted".red());
        } else {
            println!("  {}  {}  {}", short.yellow(), when.dimmed(), entry["value"]);
        }
    }
}

fn to_json(outcome: &Outcome) -> Value {
    let response = &outcome.response;
    let payload = serde_json::from_slice::<Value>(&response.payload)
        .unwrap_or_else(|_| Value::String(response.payload_str().into_owned()));
    json!({
        "function": outcome.function,
        "txid": outcome.tx_id.as_str(),
        "status": response.status,
        "message": response.message,
        "payload": payload,
    })
}

fn cmd_config(config: &PeerConfig) -> anyhow::Result<ExitCode> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}
