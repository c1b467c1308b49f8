//! Fundamental identifier types for the Hedera SDK.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! ledger identities, `shard.realm.num` entity ids, their network-bound checksums
//! and their 20-byte Solidity address form.

pub mod checksum;
pub mod entity_id;
pub mod error;
pub mod ids;
pub mod ledger_id;

pub use checksum::{checksum, Checksum};
pub use entity_id::{EntityId, SOLIDITY_ADDRESS_LEN, SOLIDITY_ADDRESS_LEN_HEX};
pub use error::EntityIdError;
pub use ids::{AccountId, ContractId, FileId, ScheduleId, TokenId, TopicId};
pub use ledger_id::LedgerId;
