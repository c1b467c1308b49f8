use thiserror::Error;

/// Errors arising from constructing, decoding or deriving keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("bad key format: {0}")]
    BadKeyFormat(String),

    #[error("this private key does not support derivation")]
    NotDerivable,

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("signatures are 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

impl From<pkcs8::Error> for KeyError {
    fn from(e: pkcs8::Error) -> Self {
        Self::BadKeyFormat(e.to_string())
    }
}

impl From<pkcs8::spki::Error> for KeyError {
    fn from(e: pkcs8::spki::Error) -> Self {
        Self::BadKeyFormat(e.to_string())
    }
}

impl From<pkcs8::der::Error> for KeyError {
    fn from(e: pkcs8::der::Error) -> Self {
        Self::BadKeyFormat(e.to_string())
    }
}
