//! `shard.realm.num` entity ids.
//!
//! Text form: `shard "." realm "." num ["-" checksum]`, where each component is
//! `0` or a decimal number without leading zeros and the optional checksum is
//! five lowercase letters.
//!
//! Solidity form: 20 bytes, shard as 4 big-endian bytes followed by realm and
//! num as 8 big-endian bytes each, hex-encoded without a `0x` prefix.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::checksum::{checksum, Checksum};
use crate::{EntityIdError, LedgerId};

/// The length of a Solidity address in bytes.
pub const SOLIDITY_ADDRESS_LEN: usize = 20;

/// The length of a hex-encoded Solidity address in characters.
pub const SOLIDITY_ADDRESS_LEN_HEX: usize = SOLIDITY_ADDRESS_LEN * 2;

/// A network entity id: account, file, contract, token, topic or schedule.
///
/// Equality, ordering and hashing consider only `(shard, realm, num)`; the
/// checksum is what the user typed, not part of the identity.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
}

impl EntityId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self {
            shard,
            realm,
            num,
            checksum: None,
        }
    }

    /// The checksum that was attached when this id was parsed, if any.
    pub fn checksum(&self) -> Option<Checksum> {
        self.checksum
    }

    /// Compute this id's checksum for the given network.
    pub fn compute_checksum(
        &self,
        ledger_id: Option<&LedgerId>,
    ) -> Result<Checksum, EntityIdError> {
        let ledger_id = ledger_id.ok_or(EntityIdError::MissingNetworkContext)?;
        checksum(ledger_id, &self.to_string())
    }

    /// Canonical form followed by `-` and the checksum computed for `ledger_id`.
    pub fn to_string_with_checksum(
        &self,
        ledger_id: Option<&LedgerId>,
    ) -> Result<String, EntityIdError> {
        let checksum = self.compute_checksum(ledger_id)?;
        Ok(format!("{self}-{checksum}"))
    }

    /// Validate the attached checksum, if any, against `ledger_id`.
    ///
    /// A missing network is an error even when no checksum is attached: the
    /// caller asked for validation and cannot get a meaningful answer.
    pub fn validate_checksum(&self, ledger_id: Option<&LedgerId>) -> Result<(), EntityIdError> {
        let ledger_id = ledger_id.ok_or(EntityIdError::MissingNetworkContext)?;
        let Some(actual) = self.checksum else {
            return Ok(());
        };
        let expected = checksum(ledger_id, &self.to_string())?;
        if expected != actual {
            return Err(EntityIdError::ChecksumMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Pack into the 20-byte Solidity layout.
    pub fn to_solidity_bytes(&self) -> Result<[u8; SOLIDITY_ADDRESS_LEN], EntityIdError> {
        let shard =
            u32::try_from(self.shard).map_err(|_| EntityIdError::ShardOutOfRange(self.shard))?;
        let mut out = [0u8; SOLIDITY_ADDRESS_LEN];
        out[..4].copy_from_slice(&shard.to_be_bytes());
        out[4..12].copy_from_slice(&self.realm.to_be_bytes());
        out[12..].copy_from_slice(&self.num.to_be_bytes());
        Ok(out)
    }

    /// Lowercase hex of [`Self::to_solidity_bytes`], never `0x`-prefixed.
    pub fn to_solidity_address(&self) -> Result<String, EntityIdError> {
        self.to_solidity_bytes().map(hex::encode)
    }

    /// Inverse of [`Self::to_solidity_bytes`]. The result carries no checksum.
    pub fn from_solidity_bytes(bytes: &[u8]) -> Result<Self, EntityIdError> {
        let bytes: &[u8; SOLIDITY_ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| EntityIdError::InvalidAddressLength(bytes.len()))?;

        let mut shard = [0u8; 4];
        let mut realm = [0u8; 8];
        let mut num = [0u8; 8];
        shard.copy_from_slice(&bytes[..4]);
        realm.copy_from_slice(&bytes[4..12]);
        num.copy_from_slice(&bytes[12..]);

        Ok(Self::new(
            u32::from_be_bytes(shard) as u64,
            u64::from_be_bytes(realm),
            u64::from_be_bytes(num),
        ))
    }

    /// Parse a 40-character hex Solidity address, with or without `0x`.
    pub fn from_solidity_address(address: &str) -> Result<Self, EntityIdError> {
        let digits = address.strip_prefix("0x").unwrap_or(address);
        if digits.len() != SOLIDITY_ADDRESS_LEN_HEX {
            return Err(EntityIdError::InvalidAddressLength(digits.len()));
        }
        let bytes = hex::decode(digits)
            .map_err(|_| EntityIdError::InvalidEntityId(address.to_string()))?;
        Self::from_solidity_bytes(&bytes)
    }
}

/// Parse one `0 | [1-9][0-9]*` component.
fn parse_component(part: &str, whole: &str) -> Result<u64, EntityIdError> {
    let invalid = || EntityIdError::InvalidEntityId(whole.to_string());

    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(invalid());
    }
    part.parse().map_err(|_| invalid())
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EntityIdError::InvalidEntityId(s.to_string());

        let (address, checksum) = match s.split_once('-') {
            Some((address, checksum)) => (address, Some(checksum.parse().map_err(|_| invalid())?)),
            None => (s, None),
        };

        let mut parts = address.split('.');
        let (Some(shard), Some(realm), Some(num), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        Ok(Self {
            shard: parse_component(shard, s)?,
            realm: parse_component(realm, s)?,
            num: parse_component(num, s)?,
            checksum,
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.checksum {
            Some(checksum) => write!(f, "\"{self}-{checksum}\""),
            None => write!(f, "\"{self}\""),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl EntityId {
    fn key(&self) -> (u64, u64, u64) {
        (self.shard, self.realm, self.num)
    }
}
