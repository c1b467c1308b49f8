//! Ed25519 private keys.
//!
//! A key is a 32-byte secret plus an optional 32-byte chain code. Keys with
//! a chain code are *derivable*: [`PrivateKey::derive`] produces hardened
//! SLIP-10 children. Keys imported from bytes, DER, PEM or legacy entropy
//! have no chain code and cannot derive.
//!
//! Derivation of a child at `index`:
//!
//! ```text
//! I = HMAC-SHA512(key = chain_code, data = 0x00 || secret || be32(index | 0x8000_0000))
//! child.secret = I[0..32], child.chain_code = I[32..64]
//! ```

use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::keys::{PublicKey, Signature};
use crate::mnemonic::Mnemonic;
use crate::primitives::{self, PUBLIC_KEY_LEN, SECRET_KEY_LEN};
use crate::KeyError;

/// HMAC key for the SLIP-10 master key of the Ed25519 curve.
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Hardened path `m/44'/3030'/0'/0'` to the account-root key (3030 is the
/// HBAR coin type). The mobile wallets only expose the final account index,
/// so this much of the path is pre-derived.
pub const ACCOUNT_ROOT_PATH: [u32; 4] = [44, 3030, 0, 0];

const HARDENED: u32 = 0x8000_0000;

const LEGACY_PBKDF2_ROUNDS: u32 = 2048;
const LEGACY_SALT: [u8; 1] = [0xFF];
const LEGACY_PAD: [u8; 8] = [0xFF; 8];

/// An Ed25519 private key.
///
/// Does not implement `Clone` or `Serialize`; secret bytes and the chain
/// code are zeroized on drop. The public key is computed on first use and
/// cached for the lifetime of the key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    secret: [u8; SECRET_KEY_LEN],
    chain_code: Option<[u8; 32]>,
    #[zeroize(skip)]
    public_key: OnceLock<PublicKey>,
}

impl PrivateKey {
    fn new(secret: [u8; SECRET_KEY_LEN], chain_code: Option<[u8; 32]>) -> Self {
        Self {
            secret,
            chain_code,
            public_key: OnceLock::new(),
        }
    }

    /// Split 64 bytes of derivation state into secret and chain code.
    fn derivable(state: &[u8; 64]) -> Self {
        let mut secret = [0u8; SECRET_KEY_LEN];
        let mut chain_code = [0u8; 32];
        secret.copy_from_slice(&state[..32]);
        chain_code.copy_from_slice(&state[32..]);
        Self::new(secret, Some(chain_code))
    }

    /// Generate a new derivable key from the operating system's secure RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rngs::OsRng)
    }

    /// Generate a new derivable key from `rng`: the first 32 bytes drawn become
    /// the secret, the next 32 the chain code.
    pub fn generate_with<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut state = Zeroizing::new([0u8; 64]);
        rng.fill_bytes(state.as_mut_slice());
        Self::derivable(&state)
    }

    /// Import a key from bytes.
    ///
    /// 32 bytes are the raw secret; 64 bytes are `secret || public` and the
    /// public half is dropped. Anything else is decoded as a DER PKCS#8
    /// `PrivateKeyInfo`. Imported keys are never derivable.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        match bytes.len() {
            SECRET_KEY_LEN => Self::from_bytes_raw(bytes),
            len if len == SECRET_KEY_LEN + PUBLIC_KEY_LEN => {
                Self::from_bytes_raw(&bytes[..SECRET_KEY_LEN])
            }
            _ => Self::from_bytes_der(bytes),
        }
    }

    fn from_bytes_raw(bytes: &[u8]) -> Result<Self, KeyError> {
        let secret: [u8; SECRET_KEY_LEN] = bytes.try_into().map_err(|_| {
            KeyError::BadKeyFormat(format!("expected 32 secret bytes, got {}", bytes.len()))
        })?;
        Ok(Self::new(secret, None))
    }

    pub fn from_bytes_der(der: &[u8]) -> Result<Self, KeyError> {
        let secret = primitives::private_key_from_der(der)?;
        Ok(Self::new(*secret, None))
    }

    /// Parse the first `PRIVATE KEY` section of a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let der = crate::pem::read_private_key(pem, None)?;
        Self::from_bytes_der(&der)
    }

    /// Parse the first `PRIVATE KEY` or `ENCRYPTED PRIVATE KEY` section,
    /// decrypting the latter with `password`.
    pub fn from_pem_with_password(pem: &str, password: &str) -> Result<Self, KeyError> {
        let der = crate::pem::read_private_key(pem, Some(password))?;
        Self::from_bytes_der(&der)
    }

    /// Recover the account-root key from a BIP-39 mnemonic and passphrase.
    ///
    /// The returned key is derivable; use [`Self::derive`] with an account
    /// index (0 for the default account) for the final key.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Self, KeyError> {
        let seed = mnemonic.to_seed(passphrase);
        let state = primitives::hmac_sha512(ED25519_SEED_KEY, &[seed.as_slice()])?;

        let mut key = Self::derivable(&state);
        for index in ACCOUNT_ROOT_PATH {
            key = key.derive(index)?;
        }
        Ok(key)
    }

    /// Recover a key from the entropy of a legacy (pre-BIP-39) wallet phrase.
    ///
    /// Legacy keys have no chain code and can never derive children.
    pub fn from_legacy_entropy(entropy: &[u8]) -> Self {
        let mut password = Zeroizing::new(Vec::with_capacity(entropy.len() + LEGACY_PAD.len()));
        password.extend_from_slice(entropy);
        password.extend_from_slice(&LEGACY_PAD);

        let secret = primitives::pbkdf2_sha512(&password, &LEGACY_SALT, LEGACY_PBKDF2_ROUNDS);
        Self::new(*secret, None)
    }

    /// Whether this key carries a chain code.
    pub fn is_derivable(&self) -> bool {
        self.chain_code.is_some()
    }

    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        self.chain_code.as_ref()
    }

    /// Derive the hardened child at `index`.
    ///
    /// Every index is hardened: the top bit is set whether or not the caller
    /// set it, so `derive(7)` and `derive(7 | 0x8000_0000)` agree.
    pub fn derive(&self, index: u32) -> Result<Self, KeyError> {
        let chain_code = self.chain_code.as_ref().ok_or(KeyError::NotDerivable)?;
        let index_bytes = (index | HARDENED).to_be_bytes();

        let state = primitives::hmac_sha512(chain_code, &[&[0x00], &self.secret, &index_bytes])?;
        Ok(Self::derivable(&state))
    }

    /// The corresponding public key, computed once and cached.
    pub fn public_key(&self) -> PublicKey {
        *self
            .public_key
            .get_or_init(|| PublicKey::from_array(primitives::ed25519_public(&self.secret)))
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_array(primitives::ed25519_sign(&self.secret, message))
    }

    /// The raw 32-byte secret. The chain code is not included.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        Zeroizing::new(self.secret)
    }

    /// DER PKCS#8 `PrivateKeyInfo` of the secret. The chain code is not included.
    pub fn to_bytes_der(&self) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        primitives::private_key_to_der(&self.secret)
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    /// Hex of any form accepted by [`PrivateKey::from_bytes`], optionally `0x`-prefixed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            Zeroizing::new(hex::decode(digits).map_err(|e| KeyError::BadKeyFormat(e.to_string()))?);
        Self::from_bytes(&bytes)
    }
}

/// Lowercase hex of the DER encoding.
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let der = self.to_bytes_der().map_err(|_| fmt::Error)?;
        f.write_str(&hex::encode(der.as_slice()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .field("derivable", &self.is_derivable())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedera_nullables::NullRandom;

    const RFC_SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const RFC_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const DER_PREFIX: &str = "302e020100300506032b657004220420";

    const ZERO_24: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    fn hex32(s: &str) -> [u8; 32] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn generate_splits_secret_and_chain_code() {
        let bytes: Vec<u8> = (0u8..64).collect();
        let mut rng = NullRandom::new(bytes.clone());
        let key = PrivateKey::generate_with(&mut rng);
        assert!(key.is_derivable());
        assert_eq!(key.to_bytes().as_slice(), &bytes[..32]);
        assert_eq!(key.chain_code().unwrap().as_slice(), &bytes[32..]);
    }

    #[test]
    fn generated_keys_differ() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn from_raw_32_bytes() {
        let key = PrivateKey::from_bytes(&hex32(RFC_SECRET)).unwrap();
        assert!(!key.is_derivable());
        assert_eq!(key.public_key().to_string_raw(), RFC_PUBLIC);
    }

    #[test]
    fn from_64_bytes_drops_public_half() {
        let mut bytes = hex32(RFC_SECRET).to_vec();
        bytes.extend_from_slice(&[0xAB; 32]);
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(key.public_key().to_string_raw(), RFC_PUBLIC);
        assert!(!key.is_derivable());
    }

    #[test]
    fn der_string_round_trip() {
        let text = format!("{DER_PREFIX}{RFC_SECRET}");
        let key: PrivateKey = text.parse().unwrap();
        assert_eq!(key.to_string(), text);
        assert!(!key.is_derivable());
    }

    #[test]
    fn export_never_carries_chain_code() {
        let key = PrivateKey::generate();
        let imported: PrivateKey = key.to_string().parse().unwrap();
        assert!(!imported.is_derivable());
        assert_eq!(imported.public_key(), key.public_key());
    }

    #[test]
    fn malformed_der_is_bad_key_format() {
        for bad in ["", "3000", "302e0201", "00"] {
            let err = bad.parse::<PrivateKey>().unwrap_err();
            assert!(matches!(err, KeyError::BadKeyFormat(_)), "{bad:?} gave {err:?}");
        }
        assert!(matches!(
            "zz".parse::<PrivateKey>(),
            Err(KeyError::BadKeyFormat(_))
        ));
    }

    #[test]
    fn public_key_is_memoised_and_stable() {
        let key = PrivateKey::from_bytes(&hex32(RFC_SECRET)).unwrap();
        let first = key.public_key();
        let second = key.public_key();
        assert_eq!(first, second);
        assert_eq!(first.to_string_raw(), RFC_PUBLIC);
    }

    #[test]
    fn public_key_race_is_benign() {
        let key = PrivateKey::generate();
        let keys: Vec<PublicKey> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| key.public_key())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(keys.iter().all(|k| *k == keys[0]));
    }

    #[test]
    fn sign_verifies_with_public_key() {
        let key = PrivateKey::generate();
        let sig = key.sign(b"hello hedera");
        assert!(key.public_key().verify(b"hello hedera", &sig));
        assert!(!key.public_key().verify(b"hello hederA", &sig));
    }

    #[test]
    fn derive_vector() {
        let mut state = [0u8; 64];
        state[..32].copy_from_slice(&[1u8; 32]);
        state[32..].copy_from_slice(&[2u8; 32]);
        let parent = PrivateKey::derivable(&state);

        let child = parent.derive(7).unwrap();
        assert_eq!(
            hex::encode(child.to_bytes().as_slice()),
            "2f8bb0c902e6b9f6dba0a3dfdb3cfb5e72a912712f490e5f36d32694cfe4d3ae"
        );
        assert_eq!(
            hex::encode(child.chain_code().unwrap()),
            "e4cd2701a1e7b66803c4fa9144326cae589a0703e7e76f8290a2b67dc14ecab7"
        );
    }

    #[test]
    fn every_index_is_hardened() {
        let parent = PrivateKey::generate();
        let a = parent.derive(7).unwrap();
        let b = parent.derive(7 | 0x8000_0000).unwrap();
        assert_eq!(*a.to_bytes(), *b.to_bytes());
        assert_eq!(a.chain_code(), b.chain_code());
    }

    #[test]
    fn derive_is_deterministic_and_derivable() {
        let parent = PrivateKey::generate();
        let a = parent.derive(3).unwrap();
        let b = parent.derive(3).unwrap();
        assert_eq!(*a.to_bytes(), *b.to_bytes());
        assert!(a.is_derivable());
        assert_ne!(*a.to_bytes(), *parent.derive(4).unwrap().to_bytes());
    }

    #[test]
    fn imported_keys_are_not_derivable() {
        let key = PrivateKey::from_bytes(&hex32(RFC_SECRET)).unwrap();
        assert_eq!(key.derive(0).unwrap_err(), KeyError::NotDerivable);
    }

    #[test]
    fn mnemonic_account_root_vector() {
        let mnemonic: Mnemonic = ZERO_24.parse().unwrap();
        let root = PrivateKey::from_mnemonic(&mnemonic, "").unwrap();
        assert!(root.is_derivable());
        assert_eq!(
            hex::encode(root.to_bytes().as_slice()),
            "5bdc8d4c77debdc53fd1f2e2a3f89f1a02056007a2a72aad87ba58d871deb904"
        );
        assert_eq!(
            hex::encode(root.chain_code().unwrap()),
            "011be9e3f57825e9673d8c684e4c5d625f01a7dec017c5af29d33122a6a4effd"
        );
        assert_eq!(
            root.public_key().to_string_raw(),
            "1a1f3d0bd6d741e2c583cecdcda4dede5a6227bcc9a2e72b091ff72a564cfc2b"
        );

        let account0 = root.derive(0).unwrap();
        assert_eq!(
            hex::encode(account0.to_bytes().as_slice()),
            "9f575af0ded30d60f72fe147bb61e8bc359e32d337c65d78b5cd9ab1c34ca5c9"
        );
        assert_eq!(
            account0.public_key().to_string_raw(),
            "1aeb9fe89cdd270b5b5905eaed50e5f97ae884f5de2fb58fadc4271f72778884"
        );
    }

    #[test]
    fn mnemonic_published_sdk_vector() {
        let mnemonic: Mnemonic = "inmate flip alley wear offer often piece magnet surge toddler \
            submit right radio absent pear floor belt raven price stove replace reduce plate home"
            .parse()
            .unwrap();
        let root = mnemonic.to_private_key("").unwrap();
        assert_eq!(
            root.to_string(),
            "302e020100300506032b657004220420\
             853f15aecd22706b105da1d709b4ac05b4906170c2b9c7495dff9af49e1391da"
        );
        assert!(root.is_derivable());
    }

    #[test]
    fn mnemonic_passphrase_vector() {
        let mnemonic: Mnemonic = ZERO_24.parse().unwrap();
        let root = mnemonic.to_private_key("hedera").unwrap();
        assert_eq!(
            hex::encode(root.to_bytes().as_slice()),
            "4acc546c7b361217e7e67b105de8f1a6786a24a2be39c00cbb10427e9ffcdc5c"
        );
        let account1 = root.derive(1).unwrap();
        assert_eq!(
            account1.public_key().to_string_raw(),
            "3d3197512649526a0c4ed84d130b559c671072065613f096dcf9e24915a94d6e"
        );
    }

    #[test]
    fn legacy_entropy_vector() {
        let entropy: Vec<u8> = (0u8..32).collect();
        let key = PrivateKey::from_legacy_entropy(&entropy);
        assert!(!key.is_derivable());
        assert_eq!(
            hex::encode(key.to_bytes().as_slice()),
            "da85e7e8a1e01237118fee713024f28bdd096626329302c3b20a00ab19b8a57a"
        );
        assert_eq!(
            key.public_key().to_string_raw(),
            "15982e253b9c963d3326ee7de37ad47877252ede032cb3cfe32a3dc6b6aeca75"
        );
        assert_eq!(key.derive(0).unwrap_err(), KeyError::NotDerivable);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = PrivateKey::from_bytes(&hex32(RFC_SECRET)).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains(&RFC_SECRET[..8]));
        assert!(debug.contains("derivable: false"));
    }
}
