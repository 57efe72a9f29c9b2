use ream_bls::PubKey;
use ream_consensus::withdrawal_credentials::{
    bls_withdrawal_credentials, WithdrawalCredentialsKind,
};

use crate::{
    chain_info::{ValidatorDirectory, ValidatorInfo},
    errors::CredentialsError,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Match<'a> {
    /// BLS withdrawal credentials, a change can be built.
    Eligible(&'a ValidatorInfo),
    /// The key does not belong to any validator of interest.
    Unknown,
    AlreadyMigrated(&'a ValidatorInfo),
}

/// Whether a known validator's withdrawal credentials can still be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    AlreadyMigrated,
}

/// Finds the validator whose signing key is `signing_pubkey`. When `expected` is set only
/// that validator is considered.
pub fn match_validator<'a>(
    signing_pubkey: &PubKey,
    expected: Option<&'a ValidatorInfo>,
    directory: &ValidatorDirectory<'a>,
) -> Result<Match<'a>, CredentialsError> {
    let validator = match expected {
        Some(validator) if validator.pubkey == *signing_pubkey => validator,
        Some(_) => return Ok(Match::Unknown),
        None => match directory.by_pubkey(signing_pubkey) {
            Some(validator) => validator,
            None => return Ok(Match::Unknown),
        },
    };
    Ok(match classify(validator)? {
        Eligibility::Eligible => Match::Eligible(validator),
        Eligibility::AlreadyMigrated => Match::AlreadyMigrated(validator),
    })
}

/// Sorts a known validator by the type of its withdrawal credentials.
pub fn classify(validator: &ValidatorInfo) -> Result<Eligibility, CredentialsError> {
    match WithdrawalCredentialsKind::of(&validator.withdrawal_credentials) {
        WithdrawalCredentialsKind::Bls => Ok(Eligibility::Eligible),
        kind if kind.is_execution() => Ok(Eligibility::AlreadyMigrated),
        _ => Err(CredentialsError::UnsupportedCredentialPrefix {
            index: validator.index,
            prefix: validator.withdrawal_credentials[0],
        }),
    }
}

/// Checks that `withdrawal_pubkey` is the key committed to by the validator's BLS
/// withdrawal credentials.
pub fn check_withdrawal_key(
    validator: &ValidatorInfo,
    withdrawal_pubkey: &PubKey,
) -> Result<(), CredentialsError> {
    let derived = bls_withdrawal_credentials(withdrawal_pubkey);
    if derived[1..] != validator.withdrawal_credentials[1..] {
        return Err(CredentialsError::CredentialMismatch {
            index: validator.index,
            recorded: validator.withdrawal_credentials,
            derived,
        });
    }
    Ok(())
}
