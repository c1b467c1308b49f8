use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("transaction targets {count} nodes; sign each node's body separately")]
    AmbiguousNodeSelection { count: usize },

    #[error("no candidate nodes to freeze against")]
    NoCandidateNodes,

    #[error("transaction is frozen")]
    Frozen,

    #[error("node {0} is not a candidate for this transaction")]
    UnknownNode(String),

    #[error("a different signature from {public_key} is already present")]
    SignatureConflict { public_key: String },

    #[error("failed to serialize transaction body: {0}")]
    Serialization(String),
}
