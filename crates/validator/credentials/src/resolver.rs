use ream_bls::PubKey;
use ream_key_derivation::path::DerivationPath;
use tracing::debug;

use crate::{
    chain_info::{ValidatorDirectory, ValidatorInfo},
    config::GeneratorConfig,
    errors::CredentialsError,
    input::{parse_validator, validate_validator_path, ValidatorId},
};

/// How the validators to migrate are picked.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationSelector {
    Path(DerivationPath),
    ValidatorIndex(u64),
    /// `input` is the key as the user wrote it.
    ValidatorPubkey { pubkey: PubKey, input: String },
    /// Every validator in the chain snapshot, at the account matching its index.
    AllFromSeed,
}

impl DerivationSelector {
    pub fn from_inputs(
        path: Option<&str>,
        validator: Option<&str>,
    ) -> Result<Self, CredentialsError> {
        match (path, validator) {
            (Some(_), Some(_)) => Err(CredentialsError::ConflictingSelectors),
            (Some(path), None) => Ok(Self::Path(validate_validator_path(path)?)),
            (None, Some(validator)) => Self::from_validator(validator),
            (None, None) => Ok(Self::AllFromSeed),
        }
    }

    /// Parses a validator index or public key.
    pub fn from_validator(validator: &str) -> Result<Self, CredentialsError> {
        Ok(match parse_validator(validator)? {
            ValidatorId::Index(index) => Self::ValidatorIndex(index),
            ValidatorId::Pubkey(pubkey) => Self::ValidatorPubkey {
                pubkey,
                input: validator.to_string(),
            },
        })
    }
}

/// A path to derive, and the validator its signing key must belong to if one was named.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub path: DerivationPath,
    pub expected: Option<&'a ValidatorInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// A single validator was asked for; not finding it is an error.
    Named,
    /// Every validator the key source controls; misses are skipped.
    Bulk,
}

#[derive(Debug)]
pub struct Resolution<'a> {
    pub candidates: Vec<Candidate<'a>>,
    pub scope: Scope,
}

/// Expands `selector` into the ordered list of candidate paths to try.
pub fn resolve<'a>(
    selector: &DerivationSelector,
    directory: &ValidatorDirectory<'a>,
    config: &GeneratorConfig,
) -> Result<Resolution<'a>, CredentialsError> {
    let candidates = match selector {
        DerivationSelector::Path(path) => {
            return Ok(Resolution {
                candidates: vec![Candidate {
                    path: path.clone(),
                    expected: None,
                }],
                scope: Scope::Named,
            });
        }
        DerivationSelector::ValidatorIndex(index) => {
            let validator =
                directory
                    .by_index(*index)
                    .ok_or_else(|| CredentialsError::UnknownValidator {
                        validator: index.to_string(),
                    })?;
            named_candidates(validator, config.max_account_distance)
        }
        DerivationSelector::ValidatorPubkey { pubkey, input } => {
            let validator =
                directory
                    .by_pubkey(pubkey)
                    .ok_or_else(|| CredentialsError::UnknownValidator {
                        validator: input.clone(),
                    })?;
            named_candidates(validator, config.max_account_distance)
        }
        DerivationSelector::AllFromSeed => {
            let candidates = directory
                .indices()
                .into_iter()
                .filter_map(|index| u32::try_from(index).ok())
                .map(|account| Candidate {
                    path: DerivationPath::validator_signing(account),
                    expected: None,
                })
                .collect::<Vec<_>>();
            debug!(
                "Resolved {} candidate paths for {} validators",
                candidates.len(),
                directory.len()
            );
            return Ok(Resolution {
                candidates,
                scope: Scope::Bulk,
            });
        }
    };

    Ok(Resolution {
        candidates,
        scope: Scope::Named,
    })
}

/// The account matching the validator index first, then the remaining accounts below
/// `max_account_distance`.
fn named_candidates(validator: &ValidatorInfo, max_account_distance: u32) -> Vec<Candidate<'_>> {
    let primary = u32::try_from(validator.index).ok();
    primary
        .into_iter()
        .chain((0..max_account_distance).filter(|account| Some(*account) != primary))
        .map(|account| Candidate {
            path: DerivationPath::validator_signing(account),
            expected: Some(validator),
        })
        .collect()
}
