use std::{
    cell::Cell,
    sync::atomic::{AtomicBool, Ordering},
};

use alloy_primitives::{aliases::B32, hex, B256};
use ream_bls::{BLSSignature, PrivateKey, PubKey};
use ream_key_derivation::{DerivedKey, Eip2333KeySource, KeyDerivationError, KeySource, Seed};

use crate::chain_info::{ChainInfo, ValidatorInfo};

pub const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";
pub const SEED_HEX: &str = "0x408b285c123836004f4b8842c89324c1f01382450c0d439af345ba7fc49acf705489c6fc77dbd4e3dc1dd8cc6bc9f043db8ada1e243c4a0eafb290d399480840";
pub const WITHDRAWAL_ADDRESS: &str = "0x8c1Ff978036F2e9d7CC382Eff7B4c8c53C22ac15";
pub const VALIDATOR_3_PRIVATE_KEY: &str =
    "0x67775f030068b4610d6e1bd04948f547305b2502423fcece4c1091d065b44638";

pub const VALIDATOR_0_PUBKEY: [u8; 48] = hex!("b384f767d964e100c8a9b21018d08c25ffebae268b3ab6d610353897541971726dbfc3c7463884c68a531515aab94c87");
/// Withdrawal key of account 0, `m/12381/3600/0/0`.
pub const WITHDRAWAL_0_PUBKEY: [u8; 48] = hex!("99b1f1d84d76185466d86c34bde1101316afddae76217aa86cd066979b19858c2c9d9e56eebc1e067ac54277a61790db");
/// Withdrawal key of account 1, `m/12381/3600/1/0`.
pub const WITHDRAWAL_1_PUBKEY: [u8; 48] = hex!("8da2f450ee51c3f68c7d0acbba25dc6d1e450bfc19e50ea00cc734965aa6e24f9316d399d647d001fa45d4b83b3c89e2");
/// Public key of [`VALIDATOR_3_PRIVATE_KEY`].
pub const WITHDRAWAL_3_PUBKEY: [u8; 48] = hex!("86710abb44b6cda666577bbb255e16d98bf2525176223f3535c7dff8e70b3bc892bb361133952b03d2b078cd0718caf3");

pub const SIGNATURE_0: [u8; 96] = hex!("b78a05bad927fc896f1406b32d644ae169cecd8986c1ef8c0d037d7086f85f13e1e188b4309643a2c13ffefb0ae80511099853a0581f4b2bd2e14541047901e22a940a9c7e3ac0a882d1a8af6bfaea813a6a6be721f9262204aa9da4e47727d0");
pub const SIGNATURE_3: [u8; 96] = hex!("8d92b91c5dfd98c798fc94e1e669f3aaae72b23647de8854ea16747ffef04d465c07563403302fbc26a26dec1020e76710b04a7e4e25897e8788daaf2bb5b773256480c1baf31d338f17a5357480f3370eea1915d5697ef668aa9c3d471975fc");

fn validator(index: u64, pubkey: &str, withdrawal_credentials: &str) -> ValidatorInfo {
    ValidatorInfo {
        index,
        pubkey: PubKey::from_bytes(&hex::decode(pubkey).unwrap()).unwrap(),
        withdrawal_credentials: withdrawal_credentials.parse::<B256>().unwrap(),
    }
}

/// Four validators keyed from [`MNEMONIC`]. Validator 2 already withdraws to an execution
/// address and validator 3's credential belongs to [`VALIDATOR_3_PRIVATE_KEY`].
///
/// The signing domain is fixed at zero, which [`SIGNATURE_0`] and [`SIGNATURE_3`] are over.
pub fn chain_info() -> ChainInfo {
    ChainInfo {
        genesis_validators_root: B256::ZERO,
        current_fork_version: B32::ZERO,
        genesis_fork_version: None,
        bls_to_execution_change_domain: Some(B256::ZERO),
        epoch: 1,
        validators: vec![
            validator(
                0,
                "0xb384f767d964e100c8a9b21018d08c25ffebae268b3ab6d610353897541971726dbfc3c7463884c68a531515aab94c87",
                "0x008ba1cc4b091b91c1202bba3f508075d6ff565c77e559f0803c0792e0302bf1",
            ),
            validator(
                1,
                "0xb3d89e2f29c712c6a9f8e5a269b97617c4a94dd6f6662ab3b07ce9e5434573f15b5c988cd14bbd5804f77156a8af1cfa",
                "0x00786cb02ed28e5fbb1f7f9e931a2b72692906e6b12ce4643975e32b517691f2",
            ),
            validator(
                2,
                "0xaf9ce44f50148db412194af0baf0bab36bd5c3e0c4938911a4e502e398b59e5cca7c78e3fe034195478879eeb23db0a6",
                "0x010000000000000f00000000931a2b72692906e6b12ce4643975e32b517691f2",
            ),
            validator(
                3,
                "0x86d330af51fa593fa9f93edb9d16640186be2e93ea94d259781e1eb34deb844c3968d75ea91d19f159dbd0523c6c5ba5",
                "0x008168456b6d9a3283931fea5210da122d1e65e8ed50b8e8f5911183b02fd125",
            ),
        ],
    }
}

/// [`Eip2333KeySource`] that counts derivations and can raise a cancel flag on signing.
#[derive(Default)]
pub struct RecordingKeySource<'a> {
    inner: Eip2333KeySource,
    seeds: Cell<usize>,
    derivations: Cell<usize>,
    signatures: Cell<usize>,
    cancel_after_signatures: Option<(usize, &'a AtomicBool)>,
}

impl<'a> RecordingKeySource<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises `flag` once `count` signatures have been produced.
    pub fn cancelling_after(count: usize, flag: &'a AtomicBool) -> Self {
        Self {
            cancel_after_signatures: Some((count, flag)),
            ..Self::default()
        }
    }

    /// Seeds computed plus keys derived or imported.
    pub fn derivations(&self) -> usize {
        self.seeds.get() + self.derivations.get()
    }

    pub fn signatures(&self) -> usize {
        self.signatures.get()
    }
}

impl KeySource for RecordingKeySource<'_> {
    fn validate_mnemonic(&self, phrase: &str) -> bool {
        self.inner.validate_mnemonic(phrase)
    }

    fn seed_from_mnemonic(&self, phrase: &str) -> Result<Seed, KeyDerivationError> {
        self.seeds.set(self.seeds.get() + 1);
        self.inner.seed_from_mnemonic(phrase)
    }

    fn derive_key(&self, seed: &[u8], path: &str) -> Result<DerivedKey, KeyDerivationError> {
        self.derivations.set(self.derivations.get() + 1);
        self.inner.derive_key(seed, path)
    }

    fn key_from_private_key_hex(
        &self,
        private_key: &str,
    ) -> Result<DerivedKey, KeyDerivationError> {
        self.derivations.set(self.derivations.get() + 1);
        self.inner.key_from_private_key_hex(private_key)
    }

    fn sign(
        &self,
        private_key: &PrivateKey,
        message_root: B256,
        domain: B256,
    ) -> Result<BLSSignature, KeyDerivationError> {
        let signature = self.inner.sign(private_key, message_root, domain)?;
        self.signatures.set(self.signatures.get() + 1);
        if let Some((count, flag)) = self.cancel_after_signatures {
            if self.signatures.get() >= count {
                flag.store(true, Ordering::SeqCst);
            }
        }
        Ok(signature)
    }
}
