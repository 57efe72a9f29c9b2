use alloy_primitives::B256;
use ream_key_derivation::KeyDerivationError;
use thiserror::Error;

/// Why a withdrawal address could not be turned into an execution address.
#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("no withdrawal address provided")]
    Missing,
    #[error("withdrawal address {0} does not contain a 0x prefix")]
    MissingPrefix(String),
    #[error("failed to obtain execution address from {address}: {reason}")]
    InvalidHex { address: String, reason: String },
    #[error("withdrawal address {address} must be exactly 20 bytes in length, got {length}")]
    InvalidLength { address: String, length: usize },
}

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("mnemonic is invalid")]
    InvalidMnemonic,
    #[error("no mnemonic provided")]
    NoMnemonic,
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("only one of mnemonic or seed may be provided")]
    ConflictingKeySources,
    #[error("no mnemonic, seed or private key provided")]
    NoKeySource,
    #[error("no validator path provided")]
    NoValidatorPath,
    #[error("no validator specified")]
    NoValidator,
    #[error("no path or validator provided")]
    NoSelector,
    #[error("only one of path or validator may be provided")]
    ConflictingSelectors,
    #[error("path {path} does not match EIP-2334 format for a validator")]
    InvalidPath { path: String },
    #[error("invalid withdrawal address: {0}")]
    InvalidWithdrawalAddress(#[from] AddressError),
    #[error("invalid public key {validator}: {reason}")]
    InvalidPublicKey { validator: String, reason: String },
    #[error("invalid public key {validator}: incorrect length {length}, expected 48")]
    InvalidPublicKeyLength { validator: String, length: usize },
    #[error("unknown validator {validator}")]
    UnknownValidator { validator: String },
    #[error("failed to generate key at path {path}: {source}")]
    DerivationFailed {
        path: String,
        #[source]
        source: KeyDerivationError,
    },
    #[error("failed to create account from private key: {0}")]
    InvalidPrivateKey(#[source] KeyDerivationError),
    #[error(
        "withdrawal credentials of validator {index} are {recorded}, withdrawal key gives {derived}"
    )]
    CredentialMismatch {
        index: u64,
        recorded: B256,
        derived: B256,
    },
    #[error("validator {index} has unsupported withdrawal credentials prefix {prefix:#04x}")]
    UnsupportedCredentialPrefix { index: u64, prefix: u8 },
    #[error("failed to sign credential change: {0}")]
    SigningFailed(#[source] KeyDerivationError),
    #[error("signature for validator {index} does not verify")]
    InvalidSignature { index: u64 },
}
