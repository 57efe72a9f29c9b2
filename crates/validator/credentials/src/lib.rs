//! Generation of signed `BLSToExecutionChange` operations for validators whose keys come
//! from a mnemonic, a seed or a raw withdrawal private key.
//!
//! The entry point is [`CredentialChangeGenerator`]. It validates the request, resolves
//! which derivation paths to try, matches derived keys against a [`ChainInfo`] snapshot,
//! and signs one change per eligible validator.

pub mod builder;
pub mod chain_info;
pub mod config;
pub mod errors;
pub mod generator;
pub mod input;
pub mod matcher;
pub mod resolver;

pub use chain_info::{ChainInfo, ValidatorInfo};
pub use config::GeneratorConfig;
pub use errors::CredentialsError;
pub use generator::{Batch, CredentialChangeGenerator, CredentialChangeRequest, Generation};
pub use ream_consensus::bls_to_execution_change::SignedBLSToExecutionChange;
pub use resolver::DerivationSelector;

#[cfg(test)]
pub(crate) mod test_utils;
