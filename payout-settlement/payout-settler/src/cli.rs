//! CLI argument definition & parsing for the payout settler

use std::{path::PathBuf, str::FromStr, time::Duration};

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use clap::Parser;
use payout_settlement_api::Payout;
use tokio::fs::read_to_string;

use crate::{
    networks::{NetworkError, NetworkRegistry},
    router_client::{poller::PollerConfig, RouterClientConfig, DEFAULT_ROUTER_BASE_URL},
    vault::{error::VaultError, VaultRegistry},
};

/// An error loading the settler's inputs
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The payout file could not be read or parsed
    #[error("error reading payout: {0}")]
    Payout(String),
    /// The wallet key is malformed
    #[error("invalid private key: {0}")]
    PrivateKey(String),
    /// The vault registry could not be loaded
    #[error(transparent)]
    Vaults(#[from] VaultError),
    /// The network table could not be loaded
    #[error(transparent)]
    Networks(#[from] NetworkError),
}

#[allow(clippy::needless_pass_by_value)]
impl CliError {
    /// Create a new payout error
    pub fn payout<T: ToString>(e: T) -> Self {
        CliError::Payout(e.to_string())
    }

    /// Create a new private key error
    pub fn private_key<T: ToString>(e: T) -> Self {
        CliError::PrivateKey(e.to_string())
    }
}

/// The cli for the payout settler
#[rustfmt::skip]
#[derive(Parser)]
#[clap(about = "Settles a payout through the cross-chain router")]
pub struct Cli {
    // --- Payout --- //

    /// Path to a JSON file holding the payout to settle
    #[clap(long)]
    pub payout_path: PathBuf,
    /// The address the swap delivers to; defaults to the commerce's own
    /// address
    #[clap(long)]
    pub destination_address: Option<Address>,

    // --- Wallet --- //

    /// The private key of the commerce wallet. Without it the wallet is
    /// disconnected and settlement fails before any transaction is sent
    #[clap(long, env = "PRIVATE_KEY")]
    pub private_key: Option<String>,
    /// Path to a JSON file listing the networks and their RPC endpoints
    #[clap(long, env = "NETWORKS_PATH")]
    pub networks_path: Option<PathBuf>,

    // --- Router --- //

    /// The router API base URL
    #[clap(long, env = "ROUTER_BASE_URL", default_value = DEFAULT_ROUTER_BASE_URL)]
    pub router_base_url: String,
    /// The integrator id sent to the router
    #[clap(long, env = "ROUTER_INTEGRATOR_ID")]
    pub integrator_id: String,
    /// The timeout on route requests, in seconds
    #[clap(long, default_value = "30")]
    pub route_timeout_secs: u64,
    /// The interval between status queries, in seconds
    #[clap(long, default_value = "5")]
    pub poll_interval_secs: u64,
    /// The number of "not found" status responses tolerated before giving up
    #[clap(long, default_value = "10")]
    pub max_not_found_retries: u32,

    // --- Vaults --- //

    /// Path to a JSON file listing the deployed payout vaults
    #[clap(long, env = "VAULT_REGISTRY_PATH")]
    pub vault_registry_path: Option<PathBuf>,

    // --- Telemetry --- //

    /// Whether to emit logs as JSON
    #[clap(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Read the payout to settle
    pub async fn read_payout(&self) -> Result<Payout, CliError> {
        let json_str = read_to_string(&self.payout_path).await.map_err(CliError::payout)?;
        serde_json::from_str(&json_str).map_err(CliError::payout)
    }

    /// Parse the wallet key, if one was given
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>, CliError> {
        self.private_key
            .as_deref()
            .map(PrivateKeySigner::from_str)
            .transpose()
            .map_err(CliError::private_key)
    }

    /// Load the vault registry, falling back to the built-in deployments
    pub async fn vault_registry(&self) -> Result<VaultRegistry, CliError> {
        match &self.vault_registry_path {
            Some(path) => Ok(VaultRegistry::from_file(path).await?),
            None => Ok(VaultRegistry::default_deployments()),
        }
    }

    /// Load the network table, falling back to the built-in networks
    pub async fn networks(&self) -> Result<NetworkRegistry, CliError> {
        match &self.networks_path {
            Some(path) => Ok(NetworkRegistry::from_file(path).await?),
            None => Ok(NetworkRegistry::default()),
        }
    }

    /// The router client configuration
    pub fn router_config(&self) -> RouterClientConfig {
        RouterClientConfig {
            base_url: self.router_base_url.clone(),
            integrator_id: self.integrator_id.clone(),
            route_timeout: Duration::from_secs(self.route_timeout_secs),
        }
    }

    /// The status poller configuration
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_not_found_retries: self.max_not_found_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from([
            "payout-settler",
            "--payout-path",
            "payout.json",
            "--integrator-id",
            "my-integrator",
        ]);

        assert_eq!(cli.router_config().base_url, DEFAULT_ROUTER_BASE_URL);
        assert_eq!(cli.router_config().route_timeout, Duration::from_secs(30));
        assert_eq!(cli.poller_config().interval, Duration::from_secs(5));
        assert_eq!(cli.poller_config().max_not_found_retries, 10);
        assert!(cli.destination_address.is_none());
    }

    #[test]
    fn test_invalid_private_key() {
        let mut cli = Cli::parse_from([
            "payout-settler",
            "--payout-path",
            "payout.json",
            "--integrator-id",
            "my-integrator",
        ]);
        cli.private_key = Some("not a key".to_string());

        assert!(matches!(cli.signer(), Err(CliError::PrivateKey(_))));
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let mut cli = Cli::parse_from([
            "payout-settler",
            "--payout-path",
            "/nonexistent/payout.json",
            "--integrator-id",
            "my-integrator",
        ]);
        assert!(matches!(cli.read_payout().await, Err(CliError::Payout(_))));

        cli.networks_path = Some("/nonexistent/networks.json".into());
        assert!(matches!(cli.networks().await, Err(CliError::Networks(NetworkError::Load(_)))));

        cli.vault_registry_path = Some("/nonexistent/vaults.json".into());
        assert!(matches!(cli.vault_registry().await, Err(CliError::Vaults(VaultError::Load(_)))));
    }
}
