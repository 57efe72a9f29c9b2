//! EIP-2333 hierarchical key derivation on top of blst.

use blst::min_pk::SecretKey as BlstSecretKey;

use crate::{errors::BLSError, private_key::PrivateKey};

/// Minimum seed length accepted by EIP-2333 master key generation.
pub const MIN_SEED_LEN: usize = 32;

/// Derives the master secret key from `seed`.
pub fn derive_master(seed: &[u8]) -> Result<PrivateKey, BLSError> {
    let master = BlstSecretKey::derive_master_eip2333(seed)
        .map_err(|err| BLSError::BlstError(err.into()))?;
    Ok(PrivateKey::from(&master))
}

/// Derives the child of `parent` at `index`.
pub fn derive_child(parent: &PrivateKey, index: u32) -> Result<PrivateKey, BLSError> {
    let child = parent.to_blst_secret_key()?.derive_child_eip2333(index);
    Ok(PrivateKey::from(&child))
}
