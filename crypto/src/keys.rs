//! Public key and signature types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::primitives::{self, PUBLIC_KEY_LEN, SIGNATURE_LEN};
use crate::KeyError;

/// A 32-byte Ed25519 public key.
///
/// Ordered by its encoding so it can key the per-node signature maps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl PublicKey {
    pub(crate) fn from_array(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Accepts the raw 32-byte point or a DER `SubjectPublicKeyInfo`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() == PUBLIC_KEY_LEN {
            return Self::from_bytes_raw(bytes);
        }
        Self::from_bytes_der(bytes)
    }

    pub fn from_bytes_raw(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            KeyError::BadKeyFormat(format!("expected 32 public key bytes, got {}", bytes.len()))
        })?;
        if !primitives::ed25519_public_is_valid(&bytes) {
            return Err(KeyError::BadKeyFormat("not a valid Ed25519 point".to_string()));
        }
        Ok(Self(bytes))
    }

    pub fn from_bytes_der(der: &[u8]) -> Result<Self, KeyError> {
        Self::from_bytes_raw(&primitives::public_key_from_der(der)?)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn to_bytes_der(&self) -> Result<Vec<u8>, KeyError> {
        primitives::public_key_to_der(&self.0)
    }

    /// Lowercase hex of the raw 32 bytes.
    pub fn to_string_raw(&self) -> String {
        hex::encode(self.0)
    }

    /// Check `signature` over `message` against this key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        primitives::ed25519_verify(&self.0, message, &signature.0)
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    /// Hex of either the raw point or its DER encoding, optionally `0x`-prefixed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| KeyError::BadKeyFormat(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

/// Lowercase hex of the DER encoding.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let der = self.to_bytes_der().map_err(|_| fmt::Error)?;
        f.write_str(&hex::encode(der))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.0[..4]))
    }
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    pub(crate) fn from_array(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SigVisitor;

        impl<'de> serde::de::Visitor<'de> for SigVisitor {
            type Value = Signature;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "64 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let arr: [u8; SIGNATURE_LEN] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Signature(arr))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; SIGNATURE_LEN];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(arr))
            }
        }

        deserializer.deserialize_bytes(SigVisitor)
    }
}
