//! The escrow vault registry and the post-hooks that deposit into vaults.
//!
//! Each vault is deployed per token per network. A registry entry with the
//! zero address is a placeholder for a vault that has not been deployed yet,
//! and is treated the same as a missing entry

pub mod abi;
pub mod error;
pub mod post_hook;

use std::path::Path;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use tokio::fs::read_to_string;

use self::error::VaultError;

// -------------
// | Constants |
// -------------

/// The Celo mainnet chain id
const CELO_CHAIN_ID: u64 = 42220;
/// The Arbitrum One chain id
const ARBITRUM_CHAIN_ID: u64 = 42161;
/// The Polygon PoS chain id
const POLYGON_CHAIN_ID: u64 = 137;
/// The Celo Alfajores testnet chain id
const CELO_ALFAJORES_CHAIN_ID: u64 = 44787;

/// The cCOP token on Celo (same address on mainnet and Alfajores)
const CCOP_ADDRESS: Address = address!("8A567e2aE79CA692Bd748aB832081C45de4041eA");
/// The cREAL token on Celo
const CREAL_ADDRESS: Address = address!("e8537a3d056DA446677B9E9d6c5dB704EaAb4787");

// ---------
// | Types |
// ---------

/// The token a vault escrows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultToken {
    /// The token contract
    pub address: Address,
    /// The token symbol
    pub symbol: String,
    /// The token's decimal precision
    pub decimals: u8,
}

/// The network a vault is deployed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultNetwork {
    /// The chain id
    pub chain_id: u64,
    /// The human-readable network name
    pub name: String,
}

/// A single vault deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// The registry key of the network, e.g. `celo`
    pub network_key: String,
    /// The vault contract
    pub address: Address,
    /// The token the vault escrows
    pub token: VaultToken,
    /// The network the vault is deployed on
    pub network: VaultNetwork,
}

impl VaultConfig {
    /// Build an entry for the default deployment table
    fn placeholder(
        network_key: &str,
        network_name: &str,
        chain_id: u64,
        symbol: &str,
        token_address: Address,
        decimals: u8,
    ) -> Self {
        Self {
            network_key: network_key.to_string(),
            address: Address::ZERO,
            token: VaultToken { address: token_address, symbol: symbol.to_string(), decimals },
            network: VaultNetwork { chain_id, name: network_name.to_string() },
        }
    }

    /// Whether the vault has a deployed contract
    pub fn is_deployed(&self) -> bool {
        !self.address.is_zero()
    }
}

// ------------
// | Registry |
// ------------

/// A lookup table from `(chain id, token symbol)` to vault deployments
#[derive(Debug, Clone, Default)]
pub struct VaultRegistry {
    /// The registered vaults
    vaults: Vec<VaultConfig>,
}

impl VaultRegistry {
    /// Create a registry from a list of vaults
    pub fn new(vaults: Vec<VaultConfig>) -> Self {
        Self { vaults }
    }

    /// The built-in deployment table
    ///
    /// None of these vaults are deployed yet, so every lookup against this
    /// table falls through to settling without a post-hook
    pub fn default_deployments() -> Self {
        Self::new(vec![
            VaultConfig::placeholder("celo", "Celo", CELO_CHAIN_ID, "cCOP", CCOP_ADDRESS, 18),
            VaultConfig::placeholder("celo", "Celo", CELO_CHAIN_ID, "cREAL", CREAL_ADDRESS, 18),
            VaultConfig::placeholder(
                "arbitrum",
                "Arbitrum One",
                ARBITRUM_CHAIN_ID,
                "mxnB",
                Address::ZERO,
                18,
            ),
            VaultConfig::placeholder("polygon", "Polygon", POLYGON_CHAIN_ID, "BRL1", Address::ZERO, 18),
            VaultConfig::placeholder(
                "celoTestnet",
                "Celo Alfajores",
                CELO_ALFAJORES_CHAIN_ID,
                "cCOP",
                CCOP_ADDRESS,
                18,
            ),
        ])
    }

    /// Load a registry from a JSON file holding an array of vaults
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VaultError> {
        let json_str = read_to_string(path).await.map_err(VaultError::load)?;
        let vaults: Vec<VaultConfig> = serde_json::from_str(&json_str).map_err(VaultError::parse)?;
        Ok(Self::new(vaults))
    }

    /// Get a vault by network key and token symbol
    pub fn vault_config(&self, network_key: &str, token_symbol: &str) -> Option<&VaultConfig> {
        self.vaults
            .iter()
            .find(|v| v.network_key == network_key && v.token.symbol == token_symbol)
    }

    /// Get the deployed vault for a chain and token symbol
    pub fn vault_address(&self, chain_id: u64, token_symbol: &str) -> Result<Address, VaultError> {
        self.vaults
            .iter()
            .find(|v| v.network.chain_id == chain_id && v.token.symbol == token_symbol)
            .filter(|v| v.is_deployed())
            .map(|v| v.address)
            .ok_or_else(|| VaultError::not_configured(chain_id, token_symbol))
    }

    /// Whether a deployed vault exists for a chain and token symbol
    pub fn vault_exists(&self, chain_id: u64, token_symbol: &str) -> bool {
        self.vault_address(chain_id, token_symbol).is_ok()
    }

    /// All vaults registered on a network
    pub fn vaults_for_network(&self, network_key: &str) -> Vec<&VaultConfig> {
        self.vaults.iter().filter(|v| v.network_key == network_key).collect()
    }

    /// All vaults registered on a chain
    pub fn vaults_for_chain(&self, chain_id: u64) -> Vec<&VaultConfig> {
        self.vaults.iter().filter(|v| v.network.chain_id == chain_id).collect()
    }
}
