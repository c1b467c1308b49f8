use hedera_types::EntityIdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("entity id error: {0}")]
    EntityId(#[from] EntityIdError),

    #[error("network {0:?} has no built-in address book; list its nodes explicitly")]
    UnknownNetwork(String),
}
