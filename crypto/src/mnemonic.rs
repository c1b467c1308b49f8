//! BIP-39 mnemonic phrases.
//!
//! A mnemonic is only a derivation input: [`Mnemonic::to_seed`] stretches the
//! words and a passphrase through PBKDF2-HMAC-SHA512 (2048 rounds, salt
//! `"mnemonic" + passphrase`), and [`Mnemonic::to_private_key`] turns that seed
//! into the account-root key compatible with the mobile wallets.

use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

use crate::{KeyError, PrivateKey};

/// An ordered sequence of BIP-39 English words.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(bip39::Mnemonic);

impl Mnemonic {
    /// Generate a new 24-word mnemonic from 256 bits of entropy.
    pub fn generate_24<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, KeyError> {
        Self::generate::<32, R>(rng)
    }

    /// Generate a new 12-word mnemonic from 128 bits of entropy.
    pub fn generate_12<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, KeyError> {
        Self::generate::<16, R>(rng)
    }

    fn generate<const N: usize, R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
    ) -> Result<Self, KeyError> {
        let mut entropy = Zeroizing::new([0u8; N]);
        rng.fill_bytes(entropy.as_mut_slice());
        Self::from_entropy(entropy.as_slice())
    }

    /// Build the mnemonic that encodes `entropy` (16, 20, 24, 28 or 32 bytes).
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, KeyError> {
        bip39::Mnemonic::from_entropy(entropy)
            .map(Self)
            .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
    }

    /// Build a mnemonic from individual words, validating the checksum.
    pub fn from_words<I, S>(words: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrase = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        phrase.parse()
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.words()
    }

    pub fn word_count(&self) -> usize {
        self.0.word_count()
    }

    /// The 64-byte BIP-39 seed for `passphrase`.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.0.to_seed_normalized(passphrase))
    }

    /// Recover the account-root key; call [`PrivateKey::derive`] with an
    /// account index (0 for the default account) for the final key.
    pub fn to_private_key(&self, passphrase: &str) -> Result<PrivateKey, KeyError> {
        PrivateKey::from_mnemonic(self, passphrase)
    }
}

impl FromStr for Mnemonic {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        bip39::Mnemonic::parse_normalized(s)
            .map(Self)
            .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// The phrase is secret material; keep it out of logs.
impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.word_count())
    }
}
