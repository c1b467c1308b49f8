//! Transaction freeze and signature protocol.
//!
//! A [`Transaction`] starts as a mutable draft. Freezing fixes its candidate
//! nodes and renders one body per node, each differing only in the embedded
//! node account id. From then on the only mutation left is appending
//! signatures to the per-node maps of the [`FrozenTransaction`].
//!
//! - **Draft**: body and node list are mutable
//! - **Frozen**: body bytes are fixed; signatures can be added, never replaced

pub mod body;
pub mod error;
pub mod frozen;
pub mod signer;
pub mod transaction;

pub use body::{NodeSelector, TransactionBody};
pub use error::TransactionError;
pub use frozen::{FrozenTransaction, SignedEnvelope};
pub use signer::{SignTransaction, TransactionSigner};
pub use transaction::Transaction;
