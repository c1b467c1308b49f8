//! Draft transactions and the one-way freeze.

use std::sync::OnceLock;

use hedera_crypto::{PublicKey, Signature};
use hedera_types::AccountId;

use crate::frozen::{FrozenTransaction, SignedEnvelope};
use crate::{NodeSelector, TransactionBody, TransactionError};

/// A transaction around a business body `B`.
///
/// While in draft the body and node list may change. Freezing renders one
/// body per candidate node and is irreversible; a frozen transaction only
/// accepts new signatures.
#[derive(Debug)]
pub struct Transaction<B> {
    body: B,
    node_account_ids: Option<Vec<AccountId>>,
    frozen: OnceLock<FrozenTransaction>,
}

impl<B> Transaction<B> {
    pub fn new(body: B) -> Self {
        Self {
            body,
            node_account_ids: None,
            frozen: OnceLock::new(),
        }
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> Result<&mut B, TransactionError> {
        if self.is_frozen() {
            return Err(TransactionError::Frozen);
        }
        Ok(&mut self.body)
    }

    /// Pin the candidate nodes instead of asking a [`NodeSelector`] at freeze.
    pub fn set_node_account_ids(
        &mut self,
        node_account_ids: Vec<AccountId>,
    ) -> Result<&mut Self, TransactionError> {
        if self.is_frozen() {
            return Err(TransactionError::Frozen);
        }
        self.node_account_ids = Some(node_account_ids);
        Ok(self)
    }

    /// The frozen node list once frozen, otherwise whatever was pinned.
    pub fn node_account_ids(&self) -> Option<Vec<AccountId>> {
        match self.frozen.get() {
            Some(frozen) => Some(frozen.node_account_ids()),
            None => self.node_account_ids.clone(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    pub fn frozen(&self) -> Option<&FrozenTransaction> {
        self.frozen.get()
    }
}

impl<B: TransactionBody> Transaction<B> {
    /// Freeze against the pinned node list.
    ///
    /// Fails with [`TransactionError::NoCandidateNodes`] when no list was
    /// pinned. Freezing an already frozen transaction returns the existing
    /// result.
    pub fn freeze(&self) -> Result<&FrozenTransaction, TransactionError> {
        self.freeze_with(&Vec::<AccountId>::new())
    }

    /// Freeze, taking candidate nodes from `selector` when none were pinned.
    ///
    /// Callers racing to freeze all observe the same bodies: the first
    /// result stored wins and the others are discarded unpublished.
    pub fn freeze_with(
        &self,
        selector: &dyn NodeSelector,
    ) -> Result<&FrozenTransaction, TransactionError> {
        if let Some(frozen) = self.frozen.get() {
            return Ok(frozen);
        }

        let mut nodes = match &self.node_account_ids {
            Some(nodes) => nodes.clone(),
            None => selector.select_nodes(),
        };
        dedup_in_order(&mut nodes);
        if nodes.is_empty() {
            return Err(TransactionError::NoCandidateNodes);
        }

        let envelopes = nodes
            .into_iter()
            .map(|node| {
                let bytes = self.body.to_body_bytes(&node)?;
                Ok(SignedEnvelope::new(node, bytes))
            })
            .collect::<Result<Vec<_>, TransactionError>>()?;
        let candidate = FrozenTransaction::new(envelopes);
        let count = candidate.len();

        let frozen = self.frozen.get_or_init(|| {
            tracing::debug!(nodes = count, "transaction frozen");
            candidate
        });
        Ok(frozen)
    }

    /// The only envelope of a single-node transaction, freezing if needed.
    ///
    /// A draft is checked against its pinned node list before freezing, so a
    /// rejected call leaves it in draft.
    pub(crate) fn single_envelope(&self) -> Result<&SignedEnvelope, TransactionError> {
        if !self.is_frozen() {
            let count = match &self.node_account_ids {
                Some(nodes) => {
                    let mut nodes = nodes.clone();
                    dedup_in_order(&mut nodes);
                    nodes.len()
                }
                None => 0,
            };
            if count != 1 {
                return Err(TransactionError::AmbiguousNodeSelection { count });
            }
        }

        let frozen = self.freeze()?;
        match frozen.envelopes() {
            [envelope] => Ok(envelope),
            envelopes => Err(TransactionError::AmbiguousNodeSelection {
                count: envelopes.len(),
            }),
        }
    }

    /// Record an externally produced signature on a single-node transaction.
    ///
    /// Same node-count guard as [`crate::SignTransaction::sign_transaction`].
    pub fn add_signature(
        &self,
        public_key: PublicKey,
        signature: Signature,
    ) -> Result<&Self, TransactionError> {
        self.single_envelope()?
            .insert_signature(public_key, signature)?;
        Ok(self)
    }
}

fn dedup_in_order(nodes: &mut Vec<AccountId>) {
    let mut seen = std::collections::BTreeSet::new();
    nodes.retain(|node| seen.insert(*node));
}
