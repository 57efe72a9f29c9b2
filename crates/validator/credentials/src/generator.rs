use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use alloy_primitives::Address;
use ream_consensus::bls_to_execution_change::SignedBLSToExecutionChange;
use ream_key_derivation::{DerivedKey, KeySource, Seed};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::{
    builder::MigrationBuilder,
    chain_info::{ChainInfo, ValidatorDirectory},
    config::GeneratorConfig,
    errors::CredentialsError,
    input::{
        parse_seed, parse_validator, parse_withdrawal_address, validate_validator_path,
        ValidatorId, MIN_SEED_LEN,
    },
    matcher::{check_withdrawal_key, classify, match_validator, Eligibility, Match},
    resolver::{resolve, Candidate, DerivationSelector, Resolution, Scope},
};

/// Signed changes produced by one invocation, in the order they were built.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Batch {
    changes: Vec<SignedBLSToExecutionChange>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, change: SignedBLSToExecutionChange) {
        self.changes.push(change);
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[SignedBLSToExecutionChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<SignedBLSToExecutionChange> {
        self.changes
    }
}

impl IntoIterator for Batch {
    type Item = SignedBLSToExecutionChange;
    type IntoIter = std::vec::IntoIter<SignedBLSToExecutionChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Result of a run. `cancelled` is set when a bulk run stopped early, in which case
/// `batch` holds what was built before the stop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Generation {
    pub batch: Batch,
    pub cancelled: bool,
}

impl From<Batch> for Generation {
    fn from(batch: Batch) -> Self {
        Self {
            batch,
            cancelled: false,
        }
    }
}

/// Everything a user may supply for one run. Secrets are wiped on drop and never printed.
#[derive(Default, Clone)]
pub struct CredentialChangeRequest {
    pub mnemonic: Option<Zeroizing<String>>,
    pub seed: Option<Zeroizing<String>>,
    pub private_key: Option<Zeroizing<String>>,
    pub path: Option<String>,
    pub validator: Option<String>,
    pub withdrawal_address: Option<String>,
}

impl fmt::Debug for CredentialChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |secret: &Option<Zeroizing<String>>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialChangeRequest")
            .field("mnemonic", &redacted(&self.mnemonic))
            .field("seed", &redacted(&self.seed))
            .field("private_key", &redacted(&self.private_key))
            .field("path", &self.path)
            .field("validator", &self.validator)
            .field("withdrawal_address", &self.withdrawal_address)
            .finish()
    }
}

enum Outcome {
    Generated(SignedBLSToExecutionChange),
    AlreadyMigrated,
    Unknown,
}

/// Builds signed `BLSToExecutionChange` operations for the validators a key source controls.
pub struct CredentialChangeGenerator<'a, K: KeySource> {
    key_source: &'a K,
    directory: ValidatorDirectory<'a>,
    builder: MigrationBuilder<'a, K>,
    config: GeneratorConfig,
}

impl<'a, K: KeySource> CredentialChangeGenerator<'a, K> {
    pub fn new(key_source: &'a K, chain_info: &'a ChainInfo) -> Self {
        Self {
            key_source,
            directory: chain_info.directory(),
            builder: MigrationBuilder::new(key_source, chain_info),
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs whichever mode the supplied inputs select.
    pub fn generate(
        &self,
        request: &CredentialChangeRequest,
        cancel: &AtomicBool,
    ) -> Result<Generation, CredentialsError> {
        if request.mnemonic.is_some() && request.seed.is_some() {
            return Err(CredentialsError::ConflictingKeySources);
        }
        if request.path.is_some() && request.validator.is_some() {
            return Err(CredentialsError::ConflictingSelectors);
        }

        let path = request.path.as_deref();
        let validator = request.validator.as_deref();
        let address = request.withdrawal_address.as_deref();
        let private_key = request.private_key.as_ref().map(|key| key.as_str());

        if let Some(mnemonic) = &request.mnemonic {
            return match (path, validator) {
                (Some(_), _) => self
                    .generate_from_mnemonic_and_path(mnemonic, path, address, private_key)
                    .map(Generation::from),
                (_, Some(_)) => self
                    .generate_from_mnemonic_and_validator(mnemonic, validator, address, private_key)
                    .map(Generation::from),
                (None, None) => self.generate_from_mnemonic(mnemonic, address, private_key, cancel),
            };
        }

        if let Some(seed) = &request.seed {
            let seed = parse_seed(seed)?;
            let selector = DerivationSelector::from_inputs(path, validator)?;
            let address = parse_withdrawal_address(address)?;
            let key_override = self.import_private_key(private_key)?;
            let resolution = resolve(&selector, &self.directory, &self.config)?;
            return self.run(
                &seed,
                &selector,
                &resolution,
                address,
                key_override.as_ref(),
                cancel,
            );
        }

        match (private_key, validator) {
            (Some(private_key), Some(_)) => self
                .generate_from_private_key_and_validator(private_key, validator, address)
                .map(Generation::from),
            (Some(_), None) => Err(CredentialsError::NoSelector),
            (None, _) => Err(CredentialsError::NoKeySource),
        }
    }

    /// Generates the change for the validator whose signing key is at `path`.
    ///
    /// An unknown validator is an error, one that already withdraws to an execution address
    /// yields an empty batch. A `private_key`, if given, is used as the withdrawal key
    /// instead of the key at the parent of `path`.
    pub fn generate_from_mnemonic_and_path(
        &self,
        mnemonic: &str,
        path: Option<&str>,
        withdrawal_address: Option<&str>,
        private_key: Option<&str>,
    ) -> Result<Batch, CredentialsError> {
        self.validate_mnemonic(mnemonic)?;
        let path = validate_validator_path(path.ok_or(CredentialsError::NoValidatorPath)?)?;
        let address = parse_withdrawal_address(withdrawal_address)?;
        let key_override = self.import_private_key(private_key)?;
        let selector = DerivationSelector::Path(path);
        let resolution = resolve(&selector, &self.directory, &self.config)?;
        let seed = self.seed_from_mnemonic(mnemonic)?;

        self.run_named(
            &seed,
            &selector,
            &resolution.candidates,
            address,
            key_override.as_ref(),
        )
    }

    /// Generates the change for a validator named by index or public key.
    pub fn generate_from_mnemonic_and_validator(
        &self,
        mnemonic: &str,
        validator: Option<&str>,
        withdrawal_address: Option<&str>,
        private_key: Option<&str>,
    ) -> Result<Batch, CredentialsError> {
        self.validate_mnemonic(mnemonic)?;
        let selector =
            DerivationSelector::from_validator(validator.ok_or(CredentialsError::NoValidator)?)?;
        let address = parse_withdrawal_address(withdrawal_address)?;
        let key_override = self.import_private_key(private_key)?;
        let resolution = resolve(&selector, &self.directory, &self.config)?;
        let seed = self.seed_from_mnemonic(mnemonic)?;

        self.run_named(
            &seed,
            &selector,
            &resolution.candidates,
            address,
            key_override.as_ref(),
        )
    }

    /// Generates changes for every validator in the chain snapshot whose key the mnemonic
    /// controls.
    pub fn generate_from_mnemonic(
        &self,
        mnemonic: &str,
        withdrawal_address: Option<&str>,
        private_key: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<Generation, CredentialsError> {
        self.validate_mnemonic(mnemonic)?;
        let address = parse_withdrawal_address(withdrawal_address)?;
        let key_override = self.import_private_key(private_key)?;
        let resolution = resolve(&DerivationSelector::AllFromSeed, &self.directory, &self.config)?;
        let seed = self.seed_from_mnemonic(mnemonic)?;

        self.run_bulk(
            &seed,
            &resolution.candidates,
            address,
            key_override.as_ref(),
            cancel,
        )
    }

    /// Seed counterpart of [`Self::generate_from_mnemonic`].
    pub fn generate_from_seed(
        &self,
        seed: &[u8],
        withdrawal_address: Option<&str>,
        private_key: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<Generation, CredentialsError> {
        check_seed_len(seed)?;
        let address = parse_withdrawal_address(withdrawal_address)?;
        let key_override = self.import_private_key(private_key)?;
        let resolution = resolve(&DerivationSelector::AllFromSeed, &self.directory, &self.config)?;

        self.run_bulk(
            seed,
            &resolution.candidates,
            address,
            key_override.as_ref(),
            cancel,
        )
    }

    /// Tries a single path. Returns `None` when the key at `path` belongs to no validator
    /// or the validator has already migrated.
    ///
    /// `path` is passed to the key source as is, so malformed paths surface as derivation
    /// failures.
    pub fn generate_from_seed_and_path(
        &self,
        seed: &[u8],
        path: &str,
        withdrawal_address: Option<&str>,
        private_key: Option<&str>,
    ) -> Result<Option<SignedBLSToExecutionChange>, CredentialsError> {
        let address = parse_withdrawal_address(withdrawal_address)?;
        let key_override = self.import_private_key(private_key)?;

        let signing_key = self
            .key_source
            .derive_key(seed, path)
            .map_err(|source| CredentialsError::DerivationFailed {
                path: path.to_string(),
                source,
            })?;
        let Some(path) = signing_key.path.clone() else {
            return Err(CredentialsError::InvalidPath {
                path: path.to_string(),
            });
        };
        let candidate = Candidate {
            path,
            expected: None,
        };

        let outcome = self.process_signing_key(
            &candidate,
            signing_key,
            seed,
            address,
            key_override.as_ref(),
        )?;
        match outcome {
            Outcome::Generated(change) => Ok(Some(change)),
            Outcome::AlreadyMigrated | Outcome::Unknown => Ok(None),
        }
    }

    /// Generates the change for a validator named by index or public key, signing with
    /// `private_key` as its withdrawal key. Nothing is derived.
    pub fn generate_from_private_key_and_validator(
        &self,
        private_key: &str,
        validator: Option<&str>,
        withdrawal_address: Option<&str>,
    ) -> Result<Batch, CredentialsError> {
        let raw_validator = validator.ok_or(CredentialsError::NoValidator)?;
        let validator = parse_validator(raw_validator)?;
        let address = parse_withdrawal_address(withdrawal_address)?;

        let record = match &validator {
            ValidatorId::Index(index) => self.directory.by_index(*index),
            ValidatorId::Pubkey(pubkey) => self.directory.by_pubkey(pubkey),
        }
        .ok_or_else(|| CredentialsError::UnknownValidator {
            validator: raw_validator.to_string(),
        })?;
        let withdrawal_key = self
            .key_source
            .key_from_private_key_hex(private_key)
            .map_err(CredentialsError::InvalidPrivateKey)?;

        let mut batch = Batch::new();
        match classify(record)? {
            Eligibility::AlreadyMigrated => {
                info!(
                    "Validator {} already withdraws to an execution address",
                    record.index
                );
            }
            Eligibility::Eligible => {
                check_withdrawal_key(record, &withdrawal_key.public_key)?;
                batch.push(self.builder.build(record.index, &withdrawal_key, address)?);
                info!("Generated credential change for validator {}", record.index);
            }
        }
        Ok(batch)
    }

    fn run(
        &self,
        seed: &[u8],
        selector: &DerivationSelector,
        resolution: &Resolution<'a>,
        address: Address,
        key_override: Option<&DerivedKey>,
        cancel: &AtomicBool,
    ) -> Result<Generation, CredentialsError> {
        match resolution.scope {
            Scope::Named => self
                .run_named(seed, selector, &resolution.candidates, address, key_override)
                .map(Generation::from),
            Scope::Bulk => {
                self.run_bulk(seed, &resolution.candidates, address, key_override, cancel)
            }
        }
    }

    fn run_named(
        &self,
        seed: &[u8],
        selector: &DerivationSelector,
        candidates: &[Candidate<'_>],
        address: Address,
        key_override: Option<&DerivedKey>,
    ) -> Result<Batch, CredentialsError> {
        let mut batch = Batch::new();
        for candidate in candidates {
            match self.process_candidate(candidate, seed, address, key_override)? {
                Outcome::Generated(change) => {
                    batch.push(change);
                    return Ok(batch);
                }
                Outcome::AlreadyMigrated => return Ok(batch),
                Outcome::Unknown => {}
            }
        }

        let validator = match selector {
            DerivationSelector::Path(path) => format!("at path {path}"),
            DerivationSelector::ValidatorIndex(index) => index.to_string(),
            DerivationSelector::ValidatorPubkey { input, .. } => input.clone(),
            DerivationSelector::AllFromSeed => String::new(),
        };
        Err(CredentialsError::UnknownValidator { validator })
    }

    fn run_bulk(
        &self,
        seed: &[u8],
        candidates: &[Candidate<'_>],
        address: Address,
        key_override: Option<&DerivedKey>,
        cancel: &AtomicBool,
    ) -> Result<Generation, CredentialsError> {
        let mut batch = Batch::new();
        let mut cancelled = false;
        for candidate in candidates {
            if cancel.load(Ordering::SeqCst) {
                warn!(
                    "Cancelled after generating {} credential changes",
                    batch.len()
                );
                cancelled = true;
                break;
            }
            if let Outcome::Generated(change) =
                self.process_candidate(candidate, seed, address, key_override)?
            {
                batch.push(change);
            }
        }

        batch
            .changes
            .sort_by_key(|change| change.message.validator_index);
        info!("Generated {} credential changes", batch.len());
        Ok(Generation { batch, cancelled })
    }

    fn process_candidate(
        &self,
        candidate: &Candidate<'_>,
        seed: &[u8],
        address: Address,
        key_override: Option<&DerivedKey>,
    ) -> Result<Outcome, CredentialsError> {
        let signing_key = self
            .key_source
            .derive_key(seed, &candidate.path.to_string())
            .map_err(|source| CredentialsError::DerivationFailed {
                path: candidate.path.to_string(),
                source,
            })?;
        self.process_signing_key(candidate, signing_key, seed, address, key_override)
    }

    fn process_signing_key(
        &self,
        candidate: &Candidate<'_>,
        signing_key: DerivedKey,
        seed: &[u8],
        address: Address,
        key_override: Option<&DerivedKey>,
    ) -> Result<Outcome, CredentialsError> {
        let validator =
            match match_validator(&signing_key.public_key, candidate.expected, &self.directory)? {
                Match::Eligible(validator) => validator,
                Match::AlreadyMigrated(validator) => {
                    info!(
                        "Validator {} already withdraws to an execution address",
                        validator.index
                    );
                    return Ok(Outcome::AlreadyMigrated);
                }
                Match::Unknown => {
                    debug!("No validator found for path {}", candidate.path);
                    return Ok(Outcome::Unknown);
                }
            };
        drop(signing_key);

        let derived;
        let withdrawal_key = match key_override {
            Some(key) => key,
            None => {
                let path = candidate
                    .path
                    .parent()
                    .ok_or_else(|| CredentialsError::InvalidPath {
                        path: candidate.path.to_string(),
                    })?
                    .to_string();
                derived = self
                    .key_source
                    .derive_key(seed, &path)
                    .map_err(|source| CredentialsError::DerivationFailed { path, source })?;
                &derived
            }
        };

        check_withdrawal_key(validator, &withdrawal_key.public_key)?;
        let change = self
            .builder
            .build(validator.index, withdrawal_key, address)?;
        info!(
            "Generated credential change for validator {}",
            validator.index
        );
        Ok(Outcome::Generated(change))
    }

    fn validate_mnemonic(&self, mnemonic: &str) -> Result<(), CredentialsError> {
        if mnemonic.trim().is_empty() {
            return Err(CredentialsError::NoMnemonic);
        }
        if !self.key_source.validate_mnemonic(mnemonic) {
            return Err(CredentialsError::InvalidMnemonic);
        }
        Ok(())
    }

    fn seed_from_mnemonic(&self, mnemonic: &str) -> Result<Seed, CredentialsError> {
        self.key_source
            .seed_from_mnemonic(mnemonic)
            .map_err(|_| CredentialsError::InvalidMnemonic)
    }

    fn import_private_key(
        &self,
        private_key: Option<&str>,
    ) -> Result<Option<DerivedKey>, CredentialsError> {
        private_key
            .map(|private_key| {
                self.key_source
                    .key_from_private_key_hex(private_key)
                    .map_err(CredentialsError::InvalidPrivateKey)
            })
            .transpose()
    }
}

fn check_seed_len(seed: &[u8]) -> Result<(), CredentialsError> {
    if seed.len() < MIN_SEED_LEN {
        return Err(CredentialsError::InvalidSeed(format!(
            "seed must be at least {MIN_SEED_LEN} bytes, got {}",
            seed.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, hex, B256};
    use ream_bls::PubKey;
    use ream_key_derivation::Eip2333KeySource;

    use super::*;
    use crate::{
        chain_info::ValidatorInfo,
        test_utils::{
            chain_info, RecordingKeySource, MNEMONIC, SEED_HEX, SIGNATURE_0, SIGNATURE_3,
            VALIDATOR_0_PUBKEY, VALIDATOR_3_PRIVATE_KEY, WITHDRAWAL_0_PUBKEY,
            WITHDRAWAL_1_PUBKEY, WITHDRAWAL_3_PUBKEY, WITHDRAWAL_ADDRESS,
        },
    };

    fn seed() -> Seed {
        parse_seed(SEED_HEX).unwrap()
    }

    fn assert_validator_0_change(change: &SignedBLSToExecutionChange) {
        assert_eq!(change.message.validator_index, 0);
        assert_eq!(change.message.from_bls_pubkey.to_bytes(), WITHDRAWAL_0_PUBKEY);
        assert_eq!(
            change.message.to_execution_address,
            address!("0x8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15")
        );
        assert_eq!(change.signature.to_bytes(), SIGNATURE_0);
    }

    fn assert_validator_3_change(change: &SignedBLSToExecutionChange) {
        assert_eq!(change.message.validator_index, 3);
        assert_eq!(change.message.from_bls_pubkey.to_bytes(), WITHDRAWAL_3_PUBKEY);
        assert_eq!(change.signature.to_bytes(), SIGNATURE_3);
    }

    #[test]
    fn test_generate_from_mnemonic_and_path() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let batch = generator
            .generate_from_mnemonic_and_path(
                MNEMONIC,
                Some("m/12381/3600/0/0/0"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_validator_0_change(&batch.changes()[0]);
    }

    #[test]
    fn test_generate_from_mnemonic_and_validator() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let pubkey = hex::encode_prefixed(VALIDATOR_0_PUBKEY);
        for validator in ["0", pubkey.as_str()] {
            let batch = generator
                .generate_from_mnemonic_and_validator(
                    MNEMONIC,
                    Some(validator),
                    Some(WITHDRAWAL_ADDRESS),
                    None,
                )
                .unwrap();
            assert_eq!(batch.len(), 1);
            assert_validator_0_change(&batch.changes()[0]);
        }
    }

    #[test]
    fn test_invalid_inputs_fail_before_derivation() {
        let key_source = RecordingKeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let path = Some("m/12381/3600/0/0/0");

        let cases = [
            (
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
                path,
                Some(WITHDRAWAL_ADDRESS),
                "mnemonic is invalid",
            ),
            (MNEMONIC, None, Some(WITHDRAWAL_ADDRESS), "no validator path provided"),
            (
                MNEMONIC,
                Some("m/12381/3600/0/0"),
                Some(WITHDRAWAL_ADDRESS),
                "path m/12381/3600/0/0 does not match EIP-2334 format for a validator",
            ),
            (
                MNEMONIC,
                Some("1"),
                Some(WITHDRAWAL_ADDRESS),
                "path 1 does not match EIP-2334 format for a validator",
            ),
            (
                MNEMONIC,
                path,
                Some("8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15"),
                "invalid withdrawal address: withdrawal address 8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15 does not contain a 0x prefix",
            ),
            (
                MNEMONIC,
                path,
                Some("0x8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac"),
                "invalid withdrawal address: withdrawal address 0x8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac must be exactly 20 bytes in length, got 19",
            ),
            (
                MNEMONIC,
                path,
                None,
                "invalid withdrawal address: no withdrawal address provided",
            ),
        ];
        for (mnemonic, path, address, expected) in cases {
            let err = generator
                .generate_from_mnemonic_and_path(mnemonic, path, address, None)
                .unwrap_err();
            assert_eq!(err.to_string(), expected);
        }

        let err = generator
            .generate_from_mnemonic_and_path(
                MNEMONIC,
                path,
                Some("0xrc1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15"),
                None,
            )
            .unwrap_err();
        let reason = hex::decode("rc1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15")
            .unwrap_err()
            .to_string();
        assert!(reason.contains("invalid character"));
        assert_eq!(
            err.to_string(),
            format!("invalid withdrawal address: failed to obtain execution address from 0xrc1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15: {reason}")
        );

        assert_eq!(key_source.derivations(), 0);
    }

    #[test]
    fn test_invalid_validator_inputs() {
        let key_source = RecordingKeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let generate = |validator: Option<&str>, address: Option<&str>| {
            generator
                .generate_from_mnemonic_and_validator(MNEMONIC, validator, address, None)
                .unwrap_err()
        };

        assert_eq!(
            generate(None, Some(WITHDRAWAL_ADDRESS)).to_string(),
            "no validator specified"
        );
        assert_eq!(
            generate(Some("0"), None).to_string(),
            "invalid withdrawal address: no withdrawal address provided"
        );
        assert_eq!(
            generate(Some("10"), Some(WITHDRAWAL_ADDRESS)).to_string(),
            "unknown validator 10"
        );

        let mut unknown = VALIDATOR_0_PUBKEY;
        unknown[47] = 0x80;
        let unknown = hex::encode_upper(unknown);
        assert_eq!(
            generate(Some(unknown.as_str()), Some(WITHDRAWAL_ADDRESS)).to_string(),
            format!("unknown validator {unknown}")
        );
        assert!(matches!(
            generate(
                Some(hex::encode_prefixed(&VALIDATOR_0_PUBKEY[..47]).as_str()),
                Some(WITHDRAWAL_ADDRESS)
            ),
            CredentialsError::InvalidPublicKeyLength { length: 47, .. }
        ));

        assert_eq!(key_source.derivations(), 0);
    }

    #[test]
    fn test_generate_from_seed_and_path() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let seed = seed();
        let generate = |path: &str, private_key: Option<&str>| {
            generator.generate_from_seed_and_path(
                &seed,
                path,
                Some(WITHDRAWAL_ADDRESS),
                private_key,
            )
        };

        let change = generate("m/12381/3600/0/0/0", None).unwrap().unwrap();
        assert_validator_0_change(&change);

        assert!(generate("m/12381/3600/999/0/0", None).unwrap().is_none());
        assert!(generate("m/12381/3600/2/0/0", None).unwrap().is_none());

        let err = generate("invalid", None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to generate key at path invalid: not master at path component 0"
        );

        let err = generate(
            "m/12381/3600/0/0/0",
            Some("0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
        )
        .unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidPrivateKey(_)));
        assert!(err
            .to_string()
            .starts_with("failed to create account from private key: "));
        assert!(!err.to_string().contains("ffffffff"));

        let change = generate("m/12381/3600/3/0/0", Some(VALIDATOR_3_PRIVATE_KEY))
            .unwrap()
            .unwrap();
        assert_validator_3_change(&change);
    }

    #[test]
    fn test_named_path_for_unknown_validator_fails() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let err = generator
            .generate_from_mnemonic_and_path(
                MNEMONIC,
                Some("m/12381/3600/999/0/0"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown validator at path m/12381/3600/999/0/0"
        );
    }

    #[test]
    fn test_already_migrated_validator_yields_nothing_repeatedly() {
        let key_source = Eip2333KeySource::new();
        let mut info = chain_info();
        info.validators[1].withdrawal_credentials[0] = 0x02;
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        for _ in 0..2 {
            let batch = generator
                .generate_from_mnemonic_and_validator(
                    MNEMONIC,
                    Some("2"),
                    Some(WITHDRAWAL_ADDRESS),
                    None,
                )
                .unwrap();
            assert!(batch.is_empty());
        }

        let batch = generator
            .generate_from_mnemonic_and_path(
                MNEMONIC,
                Some("m/12381/3600/1/0/0"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_named_validator_found_at_other_account() {
        let key_source = Eip2333KeySource::new();
        let mut info = chain_info();
        info.validators[1].index = 5;
        let generator = CredentialChangeGenerator::new(&key_source, &info).with_config(
            GeneratorConfig {
                max_account_distance: 4,
            },
        );

        let batch = generator
            .generate_from_mnemonic_and_validator(
                MNEMONIC,
                Some("5"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.changes()[0].message.validator_index, 5);
        assert_eq!(
            batch.changes()[0].message.from_bls_pubkey.to_bytes(),
            WITHDRAWAL_1_PUBKEY
        );

        let generator = CredentialChangeGenerator::new(&key_source, &info).with_config(
            GeneratorConfig {
                max_account_distance: 1,
            },
        );
        let err = generator
            .generate_from_mnemonic_and_validator(
                MNEMONIC,
                Some("5"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown validator 5");
    }

    #[test]
    fn test_withdrawal_key_must_match_credentials() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let err = generator
            .generate_from_mnemonic_and_validator(
                MNEMONIC,
                Some("3"),
                Some(WITHDRAWAL_ADDRESS),
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::CredentialMismatch { index: 3, .. }
        ));

        let batch = generator
            .generate_from_mnemonic_and_validator(
                MNEMONIC,
                Some("3"),
                Some(WITHDRAWAL_ADDRESS),
                Some(VALIDATOR_3_PRIVATE_KEY),
            )
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_validator_3_change(&batch.changes()[0]);
    }

    #[test]
    fn test_generate_from_private_key_and_validator() {
        let key_source = RecordingKeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let batch = generator
            .generate_from_private_key_and_validator(
                VALIDATOR_3_PRIVATE_KEY,
                Some("3"),
                Some(WITHDRAWAL_ADDRESS),
            )
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_validator_3_change(&batch.changes()[0]);
        assert_eq!(key_source.derivations(), 1);

        let err = generator
            .generate_from_private_key_and_validator(
                VALIDATOR_3_PRIVATE_KEY,
                Some("0"),
                Some(WITHDRAWAL_ADDRESS),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::CredentialMismatch { index: 0, .. }
        ));

        let batch = generator
            .generate_from_private_key_and_validator(
                VALIDATOR_3_PRIVATE_KEY,
                Some("2"),
                Some(WITHDRAWAL_ADDRESS),
            )
            .unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_bulk_generation() {
        let key_source = Eip2333KeySource::new();
        let mut info = chain_info();
        info.validators.truncate(3);
        info.validators.push(ValidatorInfo {
            index: 7,
            pubkey: PubKey::from_bytes(&[0x11; 48]).unwrap(),
            withdrawal_credentials: B256::ZERO,
        });
        info.validators.reverse();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let generation = generator
            .generate_from_mnemonic(MNEMONIC, Some(WITHDRAWAL_ADDRESS), None, &AtomicBool::new(false))
            .unwrap();
        assert!(!generation.cancelled);
        let changes = generation.batch.changes();
        assert_eq!(changes.len(), 2);
        assert_validator_0_change(&changes[0]);
        assert_eq!(changes[1].message.validator_index, 1);
        assert_eq!(changes[1].message.from_bls_pubkey.to_bytes(), WITHDRAWAL_1_PUBKEY);

        let from_seed = generator
            .generate_from_seed(&seed(), Some(WITHDRAWAL_ADDRESS), None, &AtomicBool::new(false))
            .unwrap();
        assert_eq!(from_seed, generation);
    }

    #[test]
    fn test_bulk_hard_error_discards_batch() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);

        let err = generator
            .generate_from_mnemonic(MNEMONIC, Some(WITHDRAWAL_ADDRESS), None, &AtomicBool::new(false))
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::CredentialMismatch { index: 3, .. }
        ));
    }

    #[test]
    fn test_bulk_cancellation_keeps_built_prefix() {
        let mut info = chain_info();
        info.validators.truncate(3);

        let cancel = AtomicBool::new(false);
        let key_source = RecordingKeySource::cancelling_after(1, &cancel);
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let generation = generator
            .generate_from_mnemonic(MNEMONIC, Some(WITHDRAWAL_ADDRESS), None, &cancel)
            .unwrap();
        assert!(generation.cancelled);
        assert_eq!(generation.batch.len(), 1);
        assert_validator_0_change(&generation.batch.changes()[0]);

        let key_source = RecordingKeySource::new();
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let generation = generator
            .generate_from_mnemonic(MNEMONIC, Some(WITHDRAWAL_ADDRESS), None, &AtomicBool::new(true))
            .unwrap();
        assert!(generation.cancelled);
        assert!(generation.batch.is_empty());
        assert_eq!(key_source.derivations(), 1);
        assert_eq!(key_source.signatures(), 0);
    }

    #[test]
    fn test_generate_dispatch() {
        let key_source = Eip2333KeySource::new();
        let info = chain_info();
        let generator = CredentialChangeGenerator::new(&key_source, &info);
        let cancel = AtomicBool::new(false);
        let base = CredentialChangeRequest {
            withdrawal_address: Some(WITHDRAWAL_ADDRESS.to_string()),
            ..Default::default()
        };

        let request = CredentialChangeRequest {
            mnemonic: Some(Zeroizing::new(MNEMONIC.to_string())),
            path: Some("m/12381/3600/0/0/0".to_string()),
            ..base.clone()
        };
        let generation = generator.generate(&request, &cancel).unwrap();
        assert_validator_0_change(&generation.batch.changes()[0]);

        let request = CredentialChangeRequest {
            seed: Some(Zeroizing::new(SEED_HEX.to_string())),
            validator: Some("0".to_string()),
            ..base.clone()
        };
        let generation = generator.generate(&request, &cancel).unwrap();
        assert_validator_0_change(&generation.batch.changes()[0]);

        let request = CredentialChangeRequest {
            private_key: Some(Zeroizing::new(VALIDATOR_3_PRIVATE_KEY.to_string())),
            validator: Some("3".to_string()),
            ..base.clone()
        };
        let generation = generator.generate(&request, &cancel).unwrap();
        assert_validator_3_change(&generation.batch.changes()[0]);

        let failures = [
            (
                CredentialChangeRequest {
                    mnemonic: Some(Zeroizing::new(MNEMONIC.to_string())),
                    seed: Some(Zeroizing::new(SEED_HEX.to_string())),
                    ..base.clone()
                },
                "only one of mnemonic or seed may be provided",
            ),
            (
                CredentialChangeRequest {
                    mnemonic: Some(Zeroizing::new(MNEMONIC.to_string())),
                    path: Some("m/12381/3600/0/0/0".to_string()),
                    validator: Some("0".to_string()),
                    ..base.clone()
                },
                "only one of path or validator may be provided",
            ),
            (
                CredentialChangeRequest {
                    private_key: Some(Zeroizing::new(VALIDATOR_3_PRIVATE_KEY.to_string())),
                    ..base.clone()
                },
                "no path or validator provided",
            ),
            (base.clone(), "no mnemonic, seed or private key provided"),
        ];
        for (request, expected) in failures {
            assert_eq!(
                generator.generate(&request, &cancel).unwrap_err().to_string(),
                expected
            );
        }

        let request = CredentialChangeRequest {
            seed: Some(Zeroizing::new("0x0102".to_string())),
            ..base
        };
        assert!(matches!(
            generator.generate(&request, &cancel),
            Err(CredentialsError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_request_debug_redacts_secrets() {
        let request = CredentialChangeRequest {
            mnemonic: Some(Zeroizing::new(MNEMONIC.to_string())),
            private_key: Some(Zeroizing::new(VALIDATOR_3_PRIVATE_KEY.to_string())),
            validator: Some("3".to_string()),
            ..Default::default()
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains("67775f03"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("\"3\""));
    }
}
