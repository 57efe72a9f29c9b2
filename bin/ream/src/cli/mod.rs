use std::{fmt, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use ream_network_spec::{cli::network_parser, networks::NetworkSpec};
use ream_validator_credentials::{config::DEFAULT_MAX_ACCOUNT_DISTANCE, CredentialChangeRequest};
use zeroize::Zeroizing;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate signed BLS to execution credential changes
    #[command(name = "set-credentials")]
    SetCredentials(SetCredentialsCommand),
}

#[derive(Parser)]
pub struct SetCredentialsCommand {
    /// Verbosity level
    #[arg(short, long, default_value_t = 3)]
    pub verbosity: u8,

    #[arg(long, help = "JSON file with the chain's validators and fork information")]
    pub chain_info: PathBuf,

    #[arg(long, env = "REAM_MNEMONIC", hide_env_values = true, conflicts_with = "seed")]
    pub mnemonic: Option<String>,

    #[arg(long, env = "REAM_SEED", hide_env_values = true, help = "Hex encoded seed")]
    pub seed: Option<String>,

    #[arg(
        long,
        env = "REAM_PRIVATE_KEY",
        hide_env_values = true,
        help = "Withdrawal private key, used instead of the derived one"
    )]
    pub private_key: Option<String>,

    #[arg(
        long,
        conflicts_with = "validator",
        help = "Validator signing key path, e.g. m/12381/3600/0/0/0"
    )]
    pub path: Option<String>,

    #[arg(long, help = "Validator index or public key")]
    pub validator: Option<String>,

    #[arg(long, help = "Execution address to withdraw to")]
    pub withdrawal_address: Option<String>,

    #[arg(
        long,
        help = "Choose mainnet, holesky, or sepolia",
        value_parser = network_parser
    )]
    pub network: Option<Arc<NetworkSpec>>,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ACCOUNT_DISTANCE,
        help = "Accounts to search for a named validator"
    )]
    pub max_distance: u32,

    #[arg(long, help = "Write the operations here instead of stdout")]
    pub output: Option<PathBuf>,
}

impl SetCredentialsCommand {
    pub fn request(&self) -> CredentialChangeRequest {
        CredentialChangeRequest {
            mnemonic: self.mnemonic.clone().map(Zeroizing::new),
            seed: self.seed.clone().map(Zeroizing::new),
            private_key: self.private_key.clone().map(Zeroizing::new),
            path: self.path.clone(),
            validator: self.validator.clone(),
            withdrawal_address: self.withdrawal_address.clone(),
        }
    }
}

impl fmt::Debug for SetCredentialsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetCredentialsCommand")
            .field("verbosity", &self.verbosity)
            .field("chain_info", &self.chain_info)
            .field("request", &self.request())
            .field("network", &self.network.as_ref().map(|spec| spec.network))
            .field("max_distance", &self.max_distance)
            .field("output", &self.output)
            .finish()
    }
}
