use std::{fmt, str::FromStr};

use crate::errors::KeyDerivationError;

/// EIP-2334 purpose for BLS12-381 keys.
pub const BLS_PURPOSE: u32 = 12381;
/// EIP-2334 coin type for Ethereum consensus keys.
pub const ETH_COIN_TYPE: u32 = 3600;

/// An EIP-2334 derivation path such as `m/12381/3600/0/0/0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// The signing key path of validator account `account`: `m/12381/3600/<account>/0/0`.
    pub fn validator_signing(account: u32) -> Self {
        Self {
            indices: vec![BLS_PURPOSE, ETH_COIN_TYPE, account, 0, 0],
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the account index if this is a validator signing key path.
    pub fn validator_account(&self) -> Option<u32> {
        match self.indices.as_slice() {
            [BLS_PURPOSE, ETH_COIN_TYPE, account, 0, 0] => Some(*account),
            _ => None,
        }
    }

    /// The path one level up. For a signing key path this is the withdrawal key path.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.indices.split_last()?;
        Some(Self {
            indices: parent.to_vec(),
        })
    }
}

impl FromStr for DerivationPath {
    type Err = KeyDerivationError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut components = path.split('/');
        if components.next() != Some("m") {
            return Err(KeyDerivationError::NotMaster { component: 0 });
        }

        let indices = components
            .enumerate()
            .map(|(position, value)| {
                value
                    .parse::<u32>()
                    .map_err(|_| KeyDerivationError::InvalidPathComponent {
                        component: position + 1,
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validator_path() {
        let path: DerivationPath = "m/12381/3600/7/0/0".parse().unwrap();
        assert_eq!(path.indices(), &[12381, 3600, 7, 0, 0]);
        assert_eq!(path.validator_account(), Some(7));
        assert_eq!(path, DerivationPath::validator_signing(7));
        assert_eq!(path.to_string(), "m/12381/3600/7/0/0");
    }

    #[test]
    fn test_parent_is_withdrawal_path() {
        let path = DerivationPath::validator_signing(3);
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "m/12381/3600/3/0");
        assert_eq!(parent.validator_account(), None);
        assert_eq!("m".parse::<DerivationPath>().unwrap().parent(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "invalid".parse::<DerivationPath>().unwrap_err().to_string(),
            "not master at path component 0"
        );
        assert_eq!(
            "m/12381/x/0".parse::<DerivationPath>().unwrap_err(),
            KeyDerivationError::InvalidPathComponent {
                component: 2,
                value: "x".to_string()
            }
        );
        // Wrong arity parses, but is not a validator path.
        let short: DerivationPath = "m/12381/3600/0/0".parse().unwrap();
        assert_eq!(short.validator_account(), None);
    }
}
