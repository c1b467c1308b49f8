//! Resolved network context.

use hedera_transactions::NodeSelector;
use hedera_types::{AccountId, EntityId, EntityIdError, LedgerId};

use crate::{ClientConfig, ClientError};

/// A consensus node: where to reach it and which account it is paid into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub address: String,
    pub account_id: AccountId,
}

/// The network a caller is connected to.
///
/// Checksums can only be computed or validated when the ledger id is known;
/// a private network without a configured `ledger_id` has none.
#[derive(Clone, Debug)]
pub struct Client {
    network_name: String,
    ledger_id: Option<LedgerId>,
    nodes: Vec<Node>,
    max_nodes_per_transaction: usize,
}

const MAINNET_NODES: &[(&str, u64)] = &[
    ("35.237.200.180:50211", 3),
    ("35.186.191.247:50211", 4),
    ("35.192.2.25:50211", 5),
    ("35.199.161.108:50211", 6),
];

const TESTNET_NODES: &[(&str, u64)] = &[
    ("0.testnet.hedera.com:50211", 3),
    ("1.testnet.hedera.com:50211", 4),
    ("2.testnet.hedera.com:50211", 5),
    ("3.testnet.hedera.com:50211", 6),
];

const PREVIEWNET_NODES: &[(&str, u64)] = &[
    ("0.previewnet.hedera.com:50211", 3),
    ("1.previewnet.hedera.com:50211", 4),
    ("2.previewnet.hedera.com:50211", 5),
    ("3.previewnet.hedera.com:50211", 6),
];

fn address_book(network: &str) -> Option<(LedgerId, &'static [(&'static str, u64)])> {
    match network {
        "mainnet" => Some((LedgerId::mainnet(), MAINNET_NODES)),
        "testnet" => Some((LedgerId::testnet(), TESTNET_NODES)),
        "previewnet" => Some((LedgerId::previewnet(), PREVIEWNET_NODES)),
        _ => None,
    }
}

impl Client {
    pub fn for_mainnet() -> Self {
        Self::for_named("mainnet", LedgerId::mainnet(), MAINNET_NODES)
    }

    pub fn for_testnet() -> Self {
        Self::for_named("testnet", LedgerId::testnet(), TESTNET_NODES)
    }

    pub fn for_previewnet() -> Self {
        Self::for_named("previewnet", LedgerId::previewnet(), PREVIEWNET_NODES)
    }

    fn for_named(name: &str, ledger_id: LedgerId, book: &[(&str, u64)]) -> Self {
        Self {
            network_name: name.to_string(),
            ledger_id: Some(ledger_id),
            nodes: book_nodes(book),
            max_nodes_per_transaction: 1,
        }
    }

    /// Resolve a configuration into a client.
    ///
    /// A well-known network name supplies both the ledger id and, when no
    /// nodes are listed, the address book. `ledger_id` overrides the former;
    /// a private network needs its nodes listed explicitly.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let builtin = address_book(&config.network);

        let nodes = if config.nodes.is_empty() {
            let (_, book) = builtin
                .as_ref()
                .ok_or_else(|| ClientError::UnknownNetwork(config.network.clone()))?;
            book_nodes(book)
        } else {
            config
                .nodes
                .iter()
                .map(|entry| {
                    Ok(Node {
                        address: entry.address.clone(),
                        account_id: entry.account_id.parse()?,
                    })
                })
                .collect::<Result<Vec<_>, EntityIdError>>()?
        };

        let ledger_id = config
            .ledger_id
            .clone()
            .or_else(|| builtin.map(|(ledger_id, _)| ledger_id));

        // Node ids typed with a checksum must belong to this network.
        for node in &nodes {
            if node.account_id.checksum().is_some() {
                if let Some(ledger_id) = &ledger_id {
                    node.account_id.validate_checksum(Some(ledger_id))?;
                }
            }
        }

        if config.max_nodes_per_transaction == 0 {
            return Err(ClientError::Config(
                "max_nodes_per_transaction must be at least 1".to_string(),
            ));
        }

        tracing::debug!(
            network = %config.network,
            ledger_id = ?ledger_id,
            nodes = nodes.len(),
            "client configured"
        );

        Ok(Self {
            network_name: config.network.clone(),
            ledger_id,
            nodes,
            max_nodes_per_transaction: config.max_nodes_per_transaction,
        })
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn ledger_id(&self) -> Option<&LedgerId> {
        self.ledger_id.as_ref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_account_ids(&self) -> Vec<AccountId> {
        self.nodes.iter().map(|node| node.account_id).collect()
    }

    pub fn max_nodes_per_transaction(&self) -> usize {
        self.max_nodes_per_transaction
    }

    /// Validate `id`'s checksum against this client's ledger.
    pub fn validate_checksum(&self, id: &EntityId) -> Result<(), EntityIdError> {
        id.validate_checksum(self.ledger_id())
    }

    /// Render `id` with the checksum for this client's ledger.
    pub fn to_string_with_checksum(&self, id: &EntityId) -> Result<String, EntityIdError> {
        id.to_string_with_checksum(self.ledger_id())
    }
}

impl NodeSelector for Client {
    /// The first `max_nodes_per_transaction` nodes, in configuration order.
    fn select_nodes(&self) -> Vec<AccountId> {
        self.nodes
            .iter()
            .take(self.max_nodes_per_transaction)
            .map(|node| node.account_id)
            .collect()
    }
}

fn book_nodes(book: &[(&str, u64)]) -> Vec<Node> {
    book.iter()
        .map(|&(address, num)| Node {
            address: address.to_string(),
            account_id: AccountId::new(0, 0, num),
        })
        .collect()
}
