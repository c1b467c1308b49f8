//! Network context for the rest of the SDK.
//!
//! A [`Client`] knows which ledger it talks to (and therefore how to compute
//! entity-id checksums) and which nodes are candidates for new transactions.
//! It is built from a [`ClientConfig`], usually loaded from TOML.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;

pub use client::{Client, Node};
pub use config::{ClientConfig, NodeEntry};
pub use error::ClientError;
pub use logging::{init_logging, LogFormat};
