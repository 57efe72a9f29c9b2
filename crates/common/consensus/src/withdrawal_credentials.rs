use alloy_primitives::B256;
use ream_bls::PubKey;
use sha2::{Digest, Sha256};

use crate::constants::{
    BLS_WITHDRAWAL_PREFIX, COMPOUNDING_WITHDRAWAL_PREFIX, ETH1_ADDRESS_WITHDRAWAL_PREFIX,
};

/// The kind of withdrawal credential a validator records, read from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalCredentialsKind {
    Bls,
    Eth1Address,
    Compounding,
    Unknown(u8),
}

impl WithdrawalCredentialsKind {
    pub fn of(withdrawal_credentials: &B256) -> Self {
        match withdrawal_credentials[0] {
            BLS_WITHDRAWAL_PREFIX => Self::Bls,
            ETH1_ADDRESS_WITHDRAWAL_PREFIX => Self::Eth1Address,
            COMPOUNDING_WITHDRAWAL_PREFIX => Self::Compounding,
            prefix => Self::Unknown(prefix),
        }
    }

    /// True when withdrawals already go to an execution address.
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Eth1Address | Self::Compounding)
    }
}

/// BLS withdrawal credentials for `withdrawal_pubkey`: `0x00 || sha256(pubkey)[1:]`.
pub fn bls_withdrawal_credentials(withdrawal_pubkey: &PubKey) -> B256 {
    let mut credentials = B256::from_slice(&Sha256::digest(withdrawal_pubkey.to_bytes()));
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    credentials
}
