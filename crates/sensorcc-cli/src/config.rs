use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "sensorcc.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// JSON snapshot holding the local ledger between runs.
    pub ledger_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub channel: String,
    pub chaincode_name: String,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(".sensorcc/ledger.json"),
            log_filter: "warn".into(),
            channel: "mychannel".into(),
            chaincode_name: "sensorcc".into(),
        }
    }
}

impl PeerConfig {
    /// Load from `path`, which must exist, or from [`DEFAULT_CONFIG_FILE`]
    /// when present. Falls back to defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
