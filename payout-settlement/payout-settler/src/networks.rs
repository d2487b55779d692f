//! The chains the settler can submit transactions on

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs::read_to_string;

/// An error loading the network table
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// An error reading a network file
    #[error("error loading networks: {0}")]
    Load(String),
    /// An error parsing a network file
    #[error("error parsing networks: {0}")]
    Parse(String),
}

#[allow(clippy::needless_pass_by_value)]
impl NetworkError {
    /// Create a new load error
    pub fn load<T: ToString>(e: T) -> Self {
        NetworkError::Load(e.to_string())
    }

    /// Create a new parse error
    pub fn parse<T: ToString>(e: T) -> Self {
        NetworkError::Parse(e.to_string())
    }
}

/// A chain and the RPC endpoint used to reach it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// The registry key of the network, e.g. `arbitrum`
    pub key: String,
    /// The chain id
    pub chain_id: u64,
    /// The human-readable network name
    pub name: String,
    /// The JSON-RPC endpoint
    pub rpc_url: String,
}

impl NetworkConfig {
    /// Constructor
    fn new(key: &str, chain_id: u64, name: &str, rpc_url: &str) -> Self {
        Self {
            key: key.to_string(),
            chain_id,
            name: name.to_string(),
            rpc_url: rpc_url.to_string(),
        }
    }
}

/// The set of known networks
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    /// The networks, in registration order
    networks: Vec<NetworkConfig>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(vec![
            NetworkConfig::new("arbitrum", 42161, "Arbitrum One", "https://arb1.arbitrum.io/rpc"),
            NetworkConfig::new("celo", 42220, "Celo", "https://forno.celo.org"),
        ])
    }
}

impl NetworkRegistry {
    /// Create a registry from a list of networks
    pub fn new(networks: Vec<NetworkConfig>) -> Self {
        Self { networks }
    }

    /// Load a registry from a JSON file holding an array of networks
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let json_str = read_to_string(path).await.map_err(NetworkError::load)?;
        let networks = serde_json::from_str(&json_str).map_err(NetworkError::parse)?;
        Ok(Self::new(networks))
    }

    /// Look up a network by chain id
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }

    /// Look up a network by its registry key
    pub fn by_key(&self, key: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.key == key)
    }

    /// Iterate over the registered networks
    pub fn iter(&self) -> impl Iterator<Item = &NetworkConfig> {
        self.networks.iter()
    }
}
