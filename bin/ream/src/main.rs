use std::{fs, path::Path, sync::atomic::AtomicBool};

use anyhow::{ensure, Context};
use clap::Parser;
use ream_key_derivation::Eip2333KeySource;
use ream_network_spec::networks::NetworkSpec;
use ream_validator_credentials::{
    ChainInfo, CredentialChangeGenerator, GeneratorConfig, SignedBLSToExecutionChange,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, SetCredentialsCommand};

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SetCredentials(cmd) => {
            init_logging(cmd.verbosity);
            set_credentials(&cmd)
        }
    }
}

fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr so stdout carries only the generated operations.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn set_credentials(cmd: &SetCredentialsCommand) -> anyhow::Result<()> {
    let mut chain_info = load_chain_info(&cmd.chain_info)?;
    if let Some(network) = &cmd.network {
        apply_network(&mut chain_info, network)?;
    }
    info!(
        "Loaded {} validators at epoch {}",
        chain_info.validators.len(),
        chain_info.epoch
    );

    let key_source = Eip2333KeySource::new();
    let generator = CredentialChangeGenerator::new(&key_source, &chain_info).with_config(
        GeneratorConfig {
            max_account_distance: cmd.max_distance,
        },
    );
    let generation = generator.generate(&cmd.request(), &AtomicBool::new(false))?;
    if generation.cancelled {
        warn!("Generation was cancelled, output is incomplete");
    }

    write_operations(generation.batch.changes(), cmd.output.as_deref())?;
    info!("Generated {} credential changes", generation.batch.len());
    Ok(())
}

fn load_chain_info(path: &Path) -> anyhow::Result<ChainInfo> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read chain info from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse chain info from {}", path.display()))
}

/// Signs over the network's genesis fork, after checking the chain info is for that network.
fn apply_network(chain_info: &mut ChainInfo, network: &NetworkSpec) -> anyhow::Result<()> {
    ensure!(
        chain_info.genesis_validators_root == network.genesis_validators_root,
        "chain info genesis validators root {} does not match {} ({})",
        chain_info.genesis_validators_root,
        network.network,
        network.genesis_validators_root
    );
    if let Some(domain) = chain_info.bls_to_execution_change_domain {
        warn!(
            "Chain info sets signing domain {domain}, {} genesis fork is not used",
            network.network
        );
    }
    chain_info.genesis_fork_version = Some(network.genesis_fork_version);
    Ok(())
}

fn write_operations(
    operations: &[SignedBLSToExecutionChange],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(operations)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write operations to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
