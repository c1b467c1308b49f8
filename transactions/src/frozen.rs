//! Frozen per-node body variants and their signature maps.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hedera_crypto::{PublicKey, Signature};
use hedera_types::AccountId;

use crate::{TransactionError, TransactionSigner};

/// One node's serialized body together with the signatures collected for it.
///
/// Inserts into the same envelope are serialized by its own lock; different
/// envelopes never contend.
#[derive(Debug)]
pub struct SignedEnvelope {
    node_account_id: AccountId,
    body_bytes: Vec<u8>,
    signatures: Mutex<BTreeMap<PublicKey, Signature>>,
}

impl SignedEnvelope {
    pub(crate) fn new(node_account_id: AccountId, body_bytes: Vec<u8>) -> Self {
        Self {
            node_account_id,
            body_bytes,
            signatures: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn node_account_id(&self) -> &AccountId {
        &self.node_account_id
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    // A panic while holding the lock cannot leave the map half-written: every
    // critical section is a single lookup or insert.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<PublicKey, Signature>> {
        self.signatures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the signatures collected so far.
    pub fn signatures(&self) -> BTreeMap<PublicKey, Signature> {
        self.lock().clone()
    }

    pub fn signature(&self, public_key: &PublicKey) -> Option<Signature> {
        self.lock().get(public_key).copied()
    }

    pub fn signature_count(&self) -> usize {
        self.lock().len()
    }

    /// Record `signature` under `public_key`.
    ///
    /// Returns `true` when the entry is new and `false` when the identical
    /// signature was already present. A different signature for a key that
    /// already signed fails with [`TransactionError::SignatureConflict`] and
    /// leaves the map untouched.
    pub fn insert_signature(
        &self,
        public_key: PublicKey,
        signature: Signature,
    ) -> Result<bool, TransactionError> {
        let mut map = self.lock();
        match map.get(&public_key) {
            Some(existing) if *existing == signature => {
                tracing::trace!(
                    node = %self.node_account_id,
                    signer = ?public_key,
                    "signature already present"
                );
                Ok(false)
            }
            Some(_) => {
                tracing::warn!(
                    node = %self.node_account_id,
                    signer = ?public_key,
                    "rejected conflicting signature"
                );
                Err(TransactionError::SignatureConflict {
                    public_key: public_key.to_string_raw(),
                })
            }
            None => {
                map.insert(public_key, signature);
                tracing::trace!(
                    node = %self.node_account_id,
                    signer = ?public_key,
                    "signature added"
                );
                Ok(true)
            }
        }
    }

    /// Sign this envelope's body and record the result.
    pub fn sign_with<S: TransactionSigner + ?Sized>(
        &self,
        signer: &S,
    ) -> Result<Signature, TransactionError> {
        let signature = signer.sign(&self.body_bytes);
        self.insert_signature(signer.public_key(), signature)?;
        Ok(signature)
    }

    /// Whether every recorded signature verifies over this envelope's body.
    pub fn verify_signatures(&self) -> bool {
        self.lock()
            .iter()
            .all(|(public_key, signature)| public_key.verify(&self.body_bytes, signature))
    }
}

/// The immutable result of freezing: one [`SignedEnvelope`] per candidate
/// node, in candidate order.
#[derive(Debug)]
pub struct FrozenTransaction {
    envelopes: Vec<SignedEnvelope>,
}

impl FrozenTransaction {
    pub(crate) fn new(envelopes: Vec<SignedEnvelope>) -> Self {
        Self { envelopes }
    }

    pub fn envelopes(&self) -> &[SignedEnvelope] {
        &self.envelopes
    }

    pub fn envelope_for(&self, node_account_id: &AccountId) -> Option<&SignedEnvelope> {
        self.envelopes
            .iter()
            .find(|envelope| envelope.node_account_id == *node_account_id)
    }

    pub fn node_account_ids(&self) -> Vec<AccountId> {
        self.envelopes.iter().map(|e| e.node_account_id).collect()
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Sign every node's body independently with `signer`.
    ///
    /// Returns the signatures in envelope order.
    pub fn sign_with<S: TransactionSigner + ?Sized>(
        &self,
        signer: &S,
    ) -> Result<Vec<Signature>, TransactionError> {
        let signatures = self
            .envelopes
            .iter()
            .map(|envelope| envelope.sign_with(signer))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            signer = ?signer.public_key(),
            envelopes = signatures.len(),
            "signed all node bodies"
        );
        Ok(signatures)
    }

    /// Record signatures produced elsewhere, one per node, under a single key.
    ///
    /// Every entry is checked before anything is inserted: an unknown node
    /// fails with [`TransactionError::UnknownNode`], and a signature that
    /// differs from one already recorded (or listed twice for the same node)
    /// fails with [`TransactionError::SignatureConflict`]. Either way no map
    /// is touched.
    pub fn add_signature_to_all<I>(
        &self,
        public_key: PublicKey,
        per_node: I,
    ) -> Result<(), TransactionError>
    where
        I: IntoIterator<Item = (AccountId, Signature)>,
    {
        let conflict = || TransactionError::SignatureConflict {
            public_key: public_key.to_string_raw(),
        };

        let mut pending: BTreeMap<AccountId, (&SignedEnvelope, Signature)> = BTreeMap::new();
        for (node, signature) in per_node {
            let envelope = self
                .envelope_for(&node)
                .ok_or_else(|| TransactionError::UnknownNode(node.to_string()))?;
            if let Some((_, listed)) = pending.get(&node) {
                if *listed != signature {
                    return Err(conflict());
                }
                continue;
            }
            if envelope.signature(&public_key).is_some_and(|existing| existing != signature) {
                tracing::warn!(
                    node = %node,
                    signer = ?public_key,
                    "rejected conflicting signature"
                );
                return Err(conflict());
            }
            pending.insert(node, (envelope, signature));
        }

        // Maps are append-only and each key has a single signer, so an entry
        // that passed the check above can only be absent or identical here.
        for (envelope, signature) in pending.into_values() {
            envelope.insert_signature(public_key, signature)?;
        }
        Ok(())
    }

    /// Public keys that have signed every node's body.
    pub fn signers(&self) -> BTreeSet<PublicKey> {
        let mut envelopes = self.envelopes.iter();
        let Some(first) = envelopes.next() else {
            return BTreeSet::new();
        };
        let mut common: BTreeSet<PublicKey> = first.lock().keys().copied().collect();
        for envelope in envelopes {
            let map = envelope.lock();
            common.retain(|key| map.contains_key(key));
        }
        common
    }

    /// Whether every signature in every envelope verifies.
    pub fn verify_signatures(&self) -> bool {
        self.envelopes.iter().all(SignedEnvelope::verify_signatures)
    }
}
