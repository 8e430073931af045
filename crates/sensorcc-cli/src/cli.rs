use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sensorcc",
    about = "Run the sensor chaincode against a local ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (default: ./sensorcc.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Instantiate the chaincode
    Init,
    /// Invoke any function by name
    Invoke(InvokeArgs),
    /// Store a reading under a key
    Save(SaveArgs),
    /// Show the current value of a key
    Query(KeyArgs),
    /// Delete a key
    Del(KeyArgs),
    /// Show every recorded version of a key
    History(KeyArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct SaveArgs {
    pub key: String,
    pub temp: String,
    pub humidity: String,
}

#[derive(Args)]
pub struct KeyArgs {
    pub key: String,
}
