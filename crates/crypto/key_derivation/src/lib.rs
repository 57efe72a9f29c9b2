//! Validator key material: EIP-2334 paths, BIP-39 mnemonics, and the [`KeySource`]
//! capability the credential tooling derives and signs through.

pub mod eip2333;
pub mod errors;
pub mod key_source;
pub mod mnemonic;
pub mod path;

pub use eip2333::Eip2333KeySource;
pub use errors::KeyDerivationError;
pub use key_source::{DerivedKey, KeySource, Seed};
pub use path::DerivationPath;
