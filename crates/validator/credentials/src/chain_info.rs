use std::collections::HashMap;

use alloy_primitives::{aliases::B32, B256};
use ream_bls::PubKey;
use ream_consensus::{constants::DOMAIN_BLS_TO_EXECUTION_CHANGE, misc::compute_domain};
use serde::{Deserialize, Serialize};

/// A validator as recorded on chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    #[serde(with = "serde_utils::quoted_u64")]
    pub index: u64,
    pub pubkey: PubKey,
    pub withdrawal_credentials: B256,
}

/// Read-only snapshot of the chain state needed to build credential changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub genesis_validators_root: B256,
    pub current_fork_version: B32,
    /// Fork version credential changes are signed over. Falls back to
    /// `current_fork_version` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_fork_version: Option<B32>,
    /// Precomputed signing domain for credential changes. Takes precedence over the
    /// fork versions when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bls_to_execution_change_domain: Option<B256>,
    #[serde(with = "serde_utils::quoted_u64")]
    pub epoch: u64,
    pub validators: Vec<ValidatorInfo>,
}

impl ChainInfo {
    pub fn signing_fork_version(&self) -> B32 {
        self.genesis_fork_version
            .unwrap_or(self.current_fork_version)
    }

    pub fn signing_domain(&self) -> B256 {
        self.bls_to_execution_change_domain.unwrap_or_else(|| {
            compute_domain(
                DOMAIN_BLS_TO_EXECUTION_CHANGE,
                self.signing_fork_version(),
                self.genesis_validators_root,
            )
        })
    }

    pub fn directory(&self) -> ValidatorDirectory<'_> {
        ValidatorDirectory::new(&self.validators)
    }
}

/// Index and public key lookups over a [`ChainInfo`]'s validators.
///
/// When the snapshot repeats an index or key, the first record wins.
#[derive(Debug)]
pub struct ValidatorDirectory<'a> {
    by_index: HashMap<u64, &'a ValidatorInfo>,
    by_pubkey: HashMap<&'a [u8], &'a ValidatorInfo>,
}

impl<'a> ValidatorDirectory<'a> {
    pub fn new(validators: &'a [ValidatorInfo]) -> Self {
        let mut by_index = HashMap::with_capacity(validators.len());
        let mut by_pubkey = HashMap::with_capacity(validators.len());
        for validator in validators {
            by_index.entry(validator.index).or_insert(validator);
            by_pubkey
                .entry(validator.pubkey.to_bytes())
                .or_insert(validator);
        }
        Self {
            by_index,
            by_pubkey,
        }
    }

    pub fn by_index(&self, index: u64) -> Option<&'a ValidatorInfo> {
        self.by_index.get(&index).copied()
    }

    pub fn by_pubkey(&self, pubkey: &PubKey) -> Option<&'a ValidatorInfo> {
        self.by_pubkey.get(pubkey.to_bytes()).copied()
    }

    /// All validator indices, ascending.
    pub fn indices(&self) -> Vec<u64> {
        let mut indices: Vec<u64> = self.by_index.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}
