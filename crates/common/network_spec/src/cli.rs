use std::sync::Arc;

use crate::networks::{Network, NetworkSpec};

/// Clap value parser for `--network`. Names are matched case-insensitively.
pub fn network_parser(name: &str) -> Result<Arc<NetworkSpec>, String> {
    name.parse::<Network>().map(|network| network.spec())
}
