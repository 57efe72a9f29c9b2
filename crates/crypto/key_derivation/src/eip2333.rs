use alloy_primitives::{hex, B256};
use ream_bls::{
    supranational::derivation::{derive_child, derive_master, MIN_SEED_LEN},
    traits::Signable,
    BLSSignature, PrivateKey,
};
use ream_consensus::misc::compute_signing_root;
use zeroize::Zeroizing;

use crate::{
    errors::KeyDerivationError,
    key_source::{DerivedKey, KeySource, Seed},
    mnemonic,
    path::DerivationPath,
};

/// [`KeySource`] backed by blst: EIP-2333 derivation and proof-of-possession signing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Eip2333KeySource;

impl Eip2333KeySource {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for Eip2333KeySource {
    fn validate_mnemonic(&self, phrase: &str) -> bool {
        mnemonic::parse(phrase).is_ok()
    }

    fn seed_from_mnemonic(&self, phrase: &str) -> Result<Seed, KeyDerivationError> {
        mnemonic::to_seed(phrase)
    }

    fn derive_key(&self, seed: &[u8], path: &str) -> Result<DerivedKey, KeyDerivationError> {
        let path: DerivationPath = path.parse()?;
        if seed.len() < MIN_SEED_LEN {
            return Err(KeyDerivationError::SeedTooShort(seed.len()));
        }

        let mut private_key = derive_master(seed)?;
        for index in path.indices() {
            private_key = derive_child(&private_key, *index)?;
        }
        let public_key = private_key.public_key()?;

        Ok(DerivedKey {
            private_key,
            public_key,
            path: Some(path),
        })
    }

    fn key_from_private_key_hex(
        &self,
        private_key: &str,
    ) -> Result<DerivedKey, KeyDerivationError> {
        let bytes = decode_private_key(private_key)?;
        let private_key = PrivateKey::try_from_slice(&bytes)
            .map_err(|err| KeyDerivationError::InvalidPrivateKey(err.to_string()))?;
        let public_key = private_key
            .public_key()
            .map_err(|err| KeyDerivationError::InvalidPrivateKey(err.to_string()))?;

        Ok(DerivedKey {
            private_key,
            public_key,
            path: None,
        })
    }

    fn sign(
        &self,
        private_key: &PrivateKey,
        message_root: B256,
        domain: B256,
    ) -> Result<BLSSignature, KeyDerivationError> {
        let signing_root = compute_signing_root(&message_root, domain);
        Ok(private_key.sign(signing_root.as_slice())?)
    }
}

fn decode_private_key(private_key: &str) -> Result<Zeroizing<Vec<u8>>, KeyDerivationError> {
    hex::decode(private_key)
        .map(Zeroizing::new)
        .map_err(|err| KeyDerivationError::InvalidPrivateKey(err.to_string()))
}
