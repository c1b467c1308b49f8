//! Typed entity ids.
//!
//! Every id kind on the network shares the [`EntityId`] grammar, checksum and
//! Solidity form; the wrappers keep an account id from being passed where a
//! file id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::{EntityId, EntityIdError};

macro_rules! typed_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(EntityId);

        impl $name {
            pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self(EntityId::new(shard, realm, num))
            }

            pub fn from_solidity_address(address: &str) -> Result<Self, EntityIdError> {
                EntityId::from_solidity_address(address).map(Self)
            }

            pub fn as_entity_id(&self) -> &EntityId {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = EntityId;

            fn deref(&self) -> &EntityId {
                &self.0
            }
        }

        impl From<EntityId> for $name {
            fn from(id: EntityId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for EntityId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = EntityIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }
    };
}

typed_entity_id! {
    /// An account on the network; also identifies the node an envelope targets.
    AccountId
}

typed_entity_id! {
    /// A file stored on the network.
    FileId
}

typed_entity_id! {
    /// A smart contract instance.
    ContractId
}

typed_entity_id! {
    TokenId
}

typed_entity_id! {
    /// A consensus service topic.
    TopicId
}

typed_entity_id! {
    ScheduleId
}
