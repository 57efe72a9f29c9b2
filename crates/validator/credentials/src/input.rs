//! Well-formedness checks run before any key is derived.

use alloy_primitives::{hex, Address};
use ream_bls::{constants::PUBKEY_BYTES_LEN, PubKey};
use ream_key_derivation::{path::DerivationPath, Seed};
use zeroize::Zeroizing;

use crate::errors::{AddressError, CredentialsError};

/// Minimum seed length accepted by EIP-2333.
pub const MIN_SEED_LEN: usize = 32;

/// A validator named by the user, either by index or by signing public key.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorId {
    Index(u64),
    Pubkey(PubKey),
}

/// Parses a `0x` prefixed, 20-byte execution address.
pub fn parse_withdrawal_address(address: Option<&str>) -> Result<Address, AddressError> {
    let address = match address {
        Some(address) if !address.is_empty() => address,
        _ => return Err(AddressError::Missing),
    };
    let Some(stripped) = address.strip_prefix("0x") else {
        return Err(AddressError::MissingPrefix(address.to_string()));
    };

    let bytes = hex::decode(stripped).map_err(|err| AddressError::InvalidHex {
        address: address.to_string(),
        reason: err.to_string(),
    })?;
    if bytes.len() != Address::len_bytes() {
        return Err(AddressError::InvalidLength {
            address: address.to_string(),
            length: bytes.len(),
        });
    }

    Ok(Address::from_slice(&bytes))
}

/// Decimal strings name a validator index, anything else must be a hex public key.
pub fn parse_validator(validator: &str) -> Result<ValidatorId, CredentialsError> {
    if !validator.is_empty() && validator.bytes().all(|byte| byte.is_ascii_digit()) {
        return validator
            .parse::<u64>()
            .map(ValidatorId::Index)
            .map_err(|err| CredentialsError::InvalidPublicKey {
                validator: validator.to_string(),
                reason: err.to_string(),
            });
    }

    let bytes = hex::decode(validator).map_err(|err| CredentialsError::InvalidPublicKey {
        validator: validator.to_string(),
        reason: err.to_string(),
    })?;
    if bytes.len() != PUBKEY_BYTES_LEN {
        return Err(CredentialsError::InvalidPublicKeyLength {
            validator: validator.to_string(),
            length: bytes.len(),
        });
    }
    PubKey::from_bytes(&bytes)
        .map(ValidatorId::Pubkey)
        .map_err(|err| CredentialsError::InvalidPublicKey {
            validator: validator.to_string(),
            reason: err.to_string(),
        })
}

/// Decodes a hex seed, optionally `0x` prefixed.
pub fn parse_seed(seed: &str) -> Result<Seed, CredentialsError> {
    let bytes = Zeroizing::new(
        hex::decode(seed.trim()).map_err(|err| CredentialsError::InvalidSeed(err.to_string()))?,
    );
    if bytes.len() < MIN_SEED_LEN {
        return Err(CredentialsError::InvalidSeed(format!(
            "seed must be at least {MIN_SEED_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Parses `path` and checks it is a validator signing key path, `m/12381/3600/<i>/0/0`.
pub fn validate_validator_path(path: &str) -> Result<DerivationPath, CredentialsError> {
    let invalid = || CredentialsError::InvalidPath {
        path: path.to_string(),
    };
    let parsed: DerivationPath = path.parse().map_err(|_| invalid())?;
    if parsed.validator_account().is_none() {
        return Err(invalid());
    }
    Ok(parsed)
}
