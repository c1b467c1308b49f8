//! Cryptographic key material for the Hedera SDK.
//!
//! - **Ed25519** for signing and signature verification
//! - **BIP-39** mnemonics with SLIP-10 hardened derivation along `m/44'/3030'/0'/0'`
//! - **Legacy** pre-BIP-39 wallet entropy through PBKDF2-HMAC-SHA512
//! - **PKCS#8** DER and PEM import/export, including encrypted PEM

pub mod error;
pub mod keys;
pub mod mnemonic;
pub mod pem;
pub mod primitives;
pub mod private_key;

pub use error::KeyError;
pub use keys::{PublicKey, Signature};
pub use mnemonic::Mnemonic;
pub use private_key::{PrivateKey, ACCOUNT_ROOT_PATH};
