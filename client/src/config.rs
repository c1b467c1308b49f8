//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use hedera_types::LedgerId;

use crate::{ClientError, LogFormat};

/// Configuration for a [`crate::Client`].
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `mainnet`, `testnet`, `previewnet`, or the name of a private network.
    #[serde(default = "default_network")]
    pub network: String,

    /// Overrides the ledger id implied by `network`. Accepts a network name
    /// or hex bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<LedgerId>,

    /// Nodes to talk to. Empty means the built-in address book for `network`.
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,

    /// How many nodes a transaction is frozen against when it does not pin
    /// its own node list.
    #[serde(default = "default_max_nodes_per_transaction")]
    pub max_nodes_per_transaction: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One entry of the address book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// `host:port` of the node's gRPC endpoint.
    pub address: String,

    /// The node's account id in `shard.realm.num` form, checksum optional.
    pub account_id: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> String {
    "testnet".to_string()
}

fn default_max_nodes_per_transaction() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            ledger_id: None,
            nodes: Vec::new(),
            max_nodes_per_transaction: default_max_nodes_per_transaction(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
