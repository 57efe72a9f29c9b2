use ream_bls::errors::BLSError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KeyDerivationError {
    #[error("mnemonic is invalid")]
    InvalidMnemonic,
    #[error("not master at path component {component}")]
    NotMaster { component: usize },
    #[error("invalid index {value:?} at path component {component}")]
    InvalidPathComponent { component: usize, value: String },
    #[error("seed must be at least 32 bytes, got {0}")]
    SeedTooShort(usize),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error(transparent)]
    Bls(#[from] BLSError),
}
