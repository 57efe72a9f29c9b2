use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use crate::{errors::KeyDerivationError, key_source::Seed};

/// Lowercases the phrase and collapses runs of whitespace to single spaces.
pub fn normalize(phrase: &str) -> Zeroizing<String> {
    Zeroizing::new(
        phrase
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Parses an English BIP-39 mnemonic, checking the word list and checksum.
pub fn parse(phrase: &str) -> Result<Mnemonic, KeyDerivationError> {
    Mnemonic::parse_in_normalized(Language::English, &normalize(phrase))
        .map_err(|_| KeyDerivationError::InvalidMnemonic)
}

/// The 64-byte BIP-39 seed of `phrase` with an empty passphrase.
pub fn to_seed(phrase: &str) -> Result<Seed, KeyDerivationError> {
    Ok(Zeroizing::new(parse(phrase)?.to_seed_normalized("").to_vec()))
}
