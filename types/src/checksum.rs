//! Network-bound entity id checksum (HIP-15).
//!
//! The checksum is five lowercase letters computed from the canonical
//! `shard.realm.num` string and the ledger id. Every SDK and the network's
//! own tooling compute it the same way, so the arithmetic below must not
//! change:
//!
//! 1. Map each character of the address to a digit, with `.` as 10.
//! 2. Fold the digits into a weighted sum `s` (mod 26^3), and sum the digits
//!    at even and odd positions separately (mod 11).
//! 3. Fold the ledger id followed by six zero bytes into `sh` (mod 26^5).
//! 4. Combine, permute by multiplying with 1_000_003, and emit five base-26
//!    letters, most significant first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{EntityIdError, LedgerId};

/// Number of letters in a checksum.
pub const CHECKSUM_LEN: usize = 5;

const P3: u64 = 26 * 26 * 26;
const P5: u64 = 26 * 26 * 26 * 26 * 26;
/// Weight for the positional sums. Coprime to `P5`.
const W: u64 = 31;
/// Smallest prime greater than one million; used for the final permutation.
const M: u64 = 1_000_003;

/// A five-letter entity id checksum, e.g. `vfmkw`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Checksum([u8; CHECKSUM_LEN]);

impl Checksum {
    pub fn as_str(&self) -> &str {
        // Construction only ever admits ASCII lowercase letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Checksum {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; CHECKSUM_LEN] = s
            .as_bytes()
            .try_into()
            .map_err(|_| EntityIdError::InvalidEntityId(s.to_string()))?;
        if !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(EntityIdError::InvalidEntityId(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Checksum {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Checksum> for String {
    fn from(c: Checksum) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.as_str())
    }
}

/// Compute the checksum of a canonical `shard.realm.num` address for a ledger.
///
/// Fails with [`EntityIdError::InvalidEntityId`] if the address contains
/// anything other than decimal digits and dots.
pub fn checksum(ledger_id: &LedgerId, address: &str) -> Result<Checksum, EntityIdError> {
    let mut s0: u64 = 0;
    let mut s1: u64 = 0;
    let mut s: u64 = 0;

    for (i, ch) in address.chars().enumerate() {
        let digit = match ch {
            '.' => 10,
            c => c
                .to_digit(10)
                .ok_or_else(|| EntityIdError::InvalidEntityId(address.to_string()))?
                as u64,
        };
        s = (W * s + digit) % P3;
        if i % 2 == 0 {
            s0 = (s0 + digit) % 11;
        } else {
            s1 = (s1 + digit) % 11;
        }
    }

    let mut sh: u64 = 0;
    for &byte in ledger_id.as_bytes().iter().chain([0u8; 6].iter()) {
        sh = (W * sh + byte as u64) % P5;
    }

    let len_mod = (address.len() % 5) as u64;
    let mut c = ((((len_mod * 11 + s0) * 11 + s1) * P3) + s + sh) % P5;
    c = (c * M) % P5;

    let mut letters = [0u8; CHECKSUM_LEN];
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (c % 26) as u8;
        c /= 26;
    }

    Ok(Checksum(letters))
}
