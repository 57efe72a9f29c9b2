use alloy_primitives::{Address, B256};
use ream_bls::traits::Verifiable;
use ream_consensus::{
    bls_to_execution_change::{BLSToExecutionChange, SignedBLSToExecutionChange},
    misc::compute_signing_root,
};
use ream_key_derivation::{DerivedKey, KeySource};
use tree_hash::TreeHash;

use crate::{chain_info::ChainInfo, errors::CredentialsError};

/// Assembles and signs `BLSToExecutionChange` messages for one chain.
#[derive(Debug)]
pub struct MigrationBuilder<'a, K> {
    key_source: &'a K,
    domain: B256,
}

impl<'a, K: KeySource> MigrationBuilder<'a, K> {
    pub fn new(key_source: &'a K, chain_info: &ChainInfo) -> Self {
        Self {
            key_source,
            domain: chain_info.signing_domain(),
        }
    }

    pub fn domain(&self) -> B256 {
        self.domain
    }

    /// Signs a change moving `validator_index` to `to_execution_address` with
    /// `withdrawal_key`, and checks the signature before returning it.
    pub fn build(
        &self,
        validator_index: u64,
        withdrawal_key: &DerivedKey,
        to_execution_address: Address,
    ) -> Result<SignedBLSToExecutionChange, CredentialsError> {
        let message = BLSToExecutionChange {
            validator_index,
            from_bls_pubkey: withdrawal_key.public_key.clone(),
            to_execution_address,
        };

        let signature = self
            .key_source
            .sign(
                &withdrawal_key.private_key,
                message.tree_hash_root(),
                self.domain,
            )
            .map_err(CredentialsError::SigningFailed)?;

        let signing_root = compute_signing_root(&message, self.domain);
        if !matches!(
            signature.verify(&withdrawal_key.public_key, signing_root.as_slice()),
            Ok(true)
        ) {
            return Err(CredentialsError::InvalidSignature {
                index: validator_index,
            });
        }

        Ok(SignedBLSToExecutionChange { message, signature })
    }
}
