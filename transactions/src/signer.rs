//! Signers and the single-signer signing path.

use hedera_crypto::{PrivateKey, PublicKey, Signature};

use crate::{Transaction, TransactionBody, TransactionError};

/// Anything that can produce Ed25519 signatures under one public key.
pub trait TransactionSigner {
    fn public_key(&self) -> PublicKey;

    fn sign(&self, message: &[u8]) -> Signature;
}

impl TransactionSigner for PrivateKey {
    fn public_key(&self) -> PublicKey {
        PrivateKey::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Signature {
        PrivateKey::sign(self, message)
    }
}

impl<T: TransactionSigner + ?Sized> TransactionSigner for &T {
    fn public_key(&self) -> PublicKey {
        (**self).public_key()
    }

    fn sign(&self, message: &[u8]) -> Signature {
        (**self).sign(message)
    }
}

pub trait SignTransaction: TransactionSigner {
    /// Sign a transaction that targets exactly one node.
    ///
    /// Freezes the transaction first if needed, signs the single body and
    /// records the signature in its map. A transaction with several candidate
    /// nodes fails with [`TransactionError::AmbiguousNodeSelection`]; sign
    /// those through [`crate::FrozenTransaction::sign_with`] instead.
    fn sign_transaction<B: TransactionBody>(
        &self,
        transaction: &Transaction<B>,
    ) -> Result<Signature, TransactionError> {
        let envelope = transaction.single_envelope()?;
        let signature = envelope.sign_with(self)?;
        tracing::debug!(
            node = %envelope.node_account_id(),
            signer = ?self.public_key(),
            "signed single-node transaction"
        );
        Ok(signature)
    }
}

impl<S: TransactionSigner + ?Sized> SignTransaction for S {}
