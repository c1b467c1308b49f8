//! Nullable infrastructure for deterministic testing.
//!
//! Key generation draws from an injected `RngCore + CryptoRng`; the
//! implementations here replay fixed bytes so tests can pin the secret and
//! chain code a generated key ends up with. Never use them outside tests.

pub mod random;

pub use random::NullRandom;
