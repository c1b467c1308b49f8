use proptest::prelude::*;

use hedera_crypto::PrivateKey;
use hedera_transactions::{SignTransaction, Transaction, TransactionBody, TransactionError};
use hedera_types::AccountId;

/// Memo bytes followed by the node's Solidity address.
#[derive(Debug)]
struct Memo(Vec<u8>);

impl TransactionBody for Memo {
    fn to_body_bytes(&self, node: &AccountId) -> Result<Vec<u8>, TransactionError> {
        let mut bytes = self.0.clone();
        bytes.extend_from_slice(
            &node
                .to_solidity_bytes()
                .map_err(|e| TransactionError::Serialization(e.to_string()))?,
        );
        Ok(bytes)
    }
}

fn arb_nodes() -> impl Strategy<Value = Vec<AccountId>> {
    prop::collection::btree_set(3u64..1000, 1..8)
        .prop_map(|nums| nums.into_iter().map(|n| AccountId::new(0, 0, n)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bodies agree everywhere except the trailing node address.
    #[test]
    fn bodies_differ_only_in_node(
        memo in prop::collection::vec(any::<u8>(), 0..64),
        nodes in arb_nodes(),
    ) {
        let mut tx = Transaction::new(Memo(memo.clone()));
        tx.set_node_account_ids(nodes.clone()).unwrap();
        let frozen = tx.freeze().unwrap();

        prop_assert_eq!(frozen.len(), nodes.len());
        for (envelope, node) in frozen.envelopes().iter().zip(&nodes) {
            prop_assert_eq!(envelope.node_account_id(), node);
            prop_assert_eq!(&envelope.body_bytes()[..memo.len()], memo.as_slice());
            prop_assert_eq!(envelope.body_bytes().len(), memo.len() + 20);
        }
    }

    /// The single-signer path succeeds exactly when one node is targeted.
    #[test]
    fn single_signer_guard(nodes in arb_nodes(), seed in any::<u8>()) {
        let mut tx = Transaction::new(Memo(b"memo".to_vec()));
        tx.set_node_account_ids(nodes.clone()).unwrap();
        let key = PrivateKey::from_bytes(&[seed; 32]).unwrap();

        match key.sign_transaction(&tx) {
            Ok(_) => prop_assert_eq!(nodes.len(), 1),
            Err(err) => prop_assert_eq!(
                err,
                TransactionError::AmbiguousNodeSelection { count: nodes.len() }
            ),
        }
    }

    /// Re-signing with the same key never grows any map.
    #[test]
    fn resigning_is_idempotent(nodes in arb_nodes(), rounds in 1usize..4) {
        let mut tx = Transaction::new(Memo(Vec::new()));
        tx.set_node_account_ids(nodes).unwrap();
        let frozen = tx.freeze().unwrap();
        let key = PrivateKey::from_bytes(&[9u8; 32]).unwrap();

        for _ in 0..rounds {
            frozen.sign_with(&key).unwrap();
        }
        prop_assert!(frozen.envelopes().iter().all(|e| e.signature_count() == 1));
        prop_assert!(frozen.verify_signatures());
    }
}
