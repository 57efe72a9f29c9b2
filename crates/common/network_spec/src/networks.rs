use std::{
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use alloy_primitives::{aliases::B32, b256, fixed_bytes, B256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Holesky,
    Sepolia,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Holesky, Network::Sepolia];

    pub fn spec(&self) -> Arc<NetworkSpec> {
        match self {
            Network::Mainnet => MAINNET.clone(),
            Network::Holesky => HOLESKY.clone(),
            Network::Sepolia => SEPOLIA.clone(),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("Not a valid network: {name}, try mainnet, holesky, or sepolia"))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Holesky => write!(f, "holesky"),
            Network::Sepolia => write!(f, "sepolia"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkSpec {
    pub network: Network,
    pub genesis_fork_version: B32,
    pub genesis_validators_root: B256,
}

pub static MAINNET: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Mainnet,
        genesis_fork_version: fixed_bytes!("0x00000000"),
        genesis_validators_root: b256!(
            "0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95"
        ),
    }
    .into()
});

pub static HOLESKY: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Holesky,
        genesis_fork_version: fixed_bytes!("0x01017000"),
        genesis_validators_root: b256!(
            "0x9143aa7c615a7f7115e2b6aac319c03529df8242ae705fba9df39b79c59fa8b1"
        ),
    }
    .into()
});

pub static SEPOLIA: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Sepolia,
        genesis_fork_version: fixed_bytes!("0x90000069"),
        genesis_validators_root: b256!(
            "0xd8ea171f3c94aea21ebc42a1ed61052acf3f9209c00e4efbaaddac09ed9b8078"
        ),
    }
    .into()
});
