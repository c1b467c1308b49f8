//! Seams to the serializer and the node-selection policy.

use hedera_types::AccountId;

use crate::TransactionError;

/// Renders the business fields of a transaction for one target node.
///
/// Implementations must be deterministic and embed `node_account_id` in the
/// output; every other byte must be identical across nodes.
pub trait TransactionBody {
    fn to_body_bytes(&self, node_account_id: &AccountId) -> Result<Vec<u8>, TransactionError>;
}

/// Supplies candidate nodes for a transaction that did not set its own.
pub trait NodeSelector {
    fn select_nodes(&self) -> Vec<AccountId>;
}

impl NodeSelector for Vec<AccountId> {
    fn select_nodes(&self) -> Vec<AccountId> {
        self.clone()
    }
}

impl<T: NodeSelector + ?Sized> NodeSelector for &T {
    fn select_nodes(&self) -> Vec<AccountId> {
        (**self).select_nodes()
    }
}
