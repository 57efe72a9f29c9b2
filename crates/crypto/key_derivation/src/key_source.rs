use alloy_primitives::B256;
use ream_bls::{BLSSignature, PrivateKey, PubKey};
use zeroize::Zeroizing;

use crate::{errors::KeyDerivationError, path::DerivationPath};

/// Seed bytes, wiped on drop.
pub type Seed = Zeroizing<Vec<u8>>;

/// A keypair produced by a [`KeySource`]. `path` is `None` for imported keys.
#[derive(Debug)]
pub struct DerivedKey {
    pub private_key: PrivateKey,
    pub public_key: PubKey,
    pub path: Option<DerivationPath>,
}

/// Capability for turning mnemonics, seeds and raw keys into BLS keypairs and signatures.
///
/// Implementations hold no per-call state; callers pass the handle to every operation
/// instead of relying on process-wide initialization.
pub trait KeySource {
    /// Returns true if `phrase` is a well-formed mnemonic with a valid checksum.
    fn validate_mnemonic(&self, phrase: &str) -> bool;

    fn seed_from_mnemonic(&self, phrase: &str) -> Result<Seed, KeyDerivationError>;

    /// Derives the key at `path` (for example `m/12381/3600/0/0/0`) from `seed`.
    fn derive_key(&self, seed: &[u8], path: &str) -> Result<DerivedKey, KeyDerivationError>;

    /// Imports a hex encoded (optionally `0x` prefixed) 32-byte secret key.
    fn key_from_private_key_hex(&self, private_key: &str)
        -> Result<DerivedKey, KeyDerivationError>;

    /// Signs `message_root` under `domain`, i.e. signs
    /// `hash_tree_root(SigningData(message_root, domain))`.
    fn sign(
        &self,
        private_key: &PrivateKey,
        message_root: B256,
        domain: B256,
    ) -> Result<BLSSignature, KeyDerivationError>;
}
