//! Thin adapter over the primitive crypto libraries.
//!
//! Everything above this module speaks in fixed-size byte arrays; the
//! `ed25519-dalek`, `hmac`, `pbkdf2` and `pkcs8` types stay in here.

use ed25519_dalek::pkcs8::{KeypairBytes, PublicKeyBytes};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use hmac::{Hmac, Mac};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::KeyError;

type HmacSha512 = Hmac<Sha512>;

pub const SECRET_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// HMAC-SHA512 over the concatenation of `parts`.
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>, KeyError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// PBKDF2 with HMAC-SHA512, producing a 32-byte key.
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<[u8; 32]> {
    let mut out = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, out.as_mut_slice());
    out
}

/// Ed25519 scalar-to-point derivation of the public key.
pub fn ed25519_public(secret: &[u8; SECRET_KEY_LEN]) -> [u8; PUBLIC_KEY_LEN] {
    SigningKey::from_bytes(secret).verifying_key().to_bytes()
}

/// Deterministic Ed25519 signature over `message`.
pub fn ed25519_sign(secret: &[u8; SECRET_KEY_LEN], message: &[u8]) -> [u8; SIGNATURE_LEN] {
    SigningKey::from_bytes(secret).sign(message).to_bytes()
}

/// Verify an Ed25519 signature.
///
/// Returns `false` for a malformed public key as well as for a bad signature.
pub fn ed25519_verify(
    public: &[u8; PUBLIC_KEY_LEN],
    message: &[u8],
    signature: &[u8; SIGNATURE_LEN],
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

/// Whether `public` decodes to a point on the curve.
pub fn ed25519_public_is_valid(public: &[u8; PUBLIC_KEY_LEN]) -> bool {
    VerifyingKey::from_bytes(public).is_ok()
}

/// RFC 8410 `PrivateKeyInfo` (version 1, no embedded public key).
pub fn private_key_to_der(secret: &[u8; SECRET_KEY_LEN]) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let keypair = KeypairBytes {
        secret_key: *secret,
        public_key: None,
    };
    let doc = keypair.to_pkcs8_der()?;
    Ok(Zeroizing::new(doc.as_bytes().to_vec()))
}

/// Extract the secret from a DER `PrivateKeyInfo`, rejecting non-Ed25519 algorithms.
pub fn private_key_from_der(der: &[u8]) -> Result<Zeroizing<[u8; SECRET_KEY_LEN]>, KeyError> {
    let keypair = KeypairBytes::from_pkcs8_der(der)?;
    Ok(Zeroizing::new(keypair.secret_key))
}

/// Decrypt a DER `EncryptedPrivateKeyInfo` into the DER `PrivateKeyInfo` it wraps.
pub fn decrypt_private_key_der(
    encrypted_der: &[u8],
    password: &[u8],
) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let info = pkcs8::EncryptedPrivateKeyInfo::try_from(encrypted_der)?;
    let doc = info.decrypt(password)?;
    Ok(Zeroizing::new(doc.as_bytes().to_vec()))
}

/// X.509 `SubjectPublicKeyInfo` for an Ed25519 public key.
pub fn public_key_to_der(public: &[u8; PUBLIC_KEY_LEN]) -> Result<Vec<u8>, KeyError> {
    let doc = PublicKeyBytes(*public).to_public_key_der()?;
    Ok(doc.as_bytes().to_vec())
}

pub fn public_key_from_der(der: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN], KeyError> {
    let public = PublicKeyBytes::from_public_key_der(der)?;
    Ok(public.0)
}
