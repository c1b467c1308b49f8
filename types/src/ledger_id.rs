//! Ledger identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EntityIdError;

/// Identifies which network instance an entity id belongs to.
///
/// The raw bytes are supplied by the network configuration and feed the
/// entity id checksum, which makes a checksummed id non-portable across
/// networks.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LedgerId(Vec<u8>);

impl LedgerId {
    const MAINNET: &'static [u8] = &[0x00];
    const TESTNET: &'static [u8] = &[0x01];
    const PREVIEWNET: &'static [u8] = &[0x02];

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn mainnet() -> Self {
        Self(Self::MAINNET.to_vec())
    }

    pub fn testnet() -> Self {
        Self(Self::TESTNET.to_vec())
    }

    pub fn previewnet() -> Self {
        Self(Self::PREVIEWNET.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_mainnet(&self) -> bool {
        self.0 == Self::MAINNET
    }

    pub fn is_testnet(&self) -> bool {
        self.0 == Self::TESTNET
    }

    pub fn is_previewnet(&self) -> bool {
        self.0 == Self::PREVIEWNET
    }

    /// Human-readable name for the well-known networks.
    pub fn name(&self) -> Option<&'static str> {
        match self.0.as_slice() {
            Self::MAINNET => Some("mainnet"),
            Self::TESTNET => Some("testnet"),
            Self::PREVIEWNET => Some("previewnet"),
            _ => None,
        }
    }
}

impl FromStr for LedgerId {
    type Err = EntityIdError;

    /// Accepts `mainnet`, `testnet`, `previewnet`, or the raw id as hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::mainnet()),
            "testnet" => Ok(Self::testnet()),
            "previewnet" => Ok(Self::previewnet()),
            other => {
                let digits = other.strip_prefix("0x").unwrap_or(other);
                hex::decode(digits)
                    .map(Self)
                    .map_err(|e| EntityIdError::InvalidLedgerId(format!("{other:?}: {e}")))
            }
        }
    }
}

impl TryFrom<String> for LedgerId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LedgerId> for String {
    fn from(id: LedgerId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&hex::encode(&self.0)),
        }
    }
}

impl fmt::Debug for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerId({self})")
    }
}
