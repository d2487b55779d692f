//! Error types for the vault registry

/// An error looking up or loading vault configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum VaultError {
    /// No vault is deployed for the given chain and token
    #[error("no vault configured for {token_symbol} on chain {chain_id}")]
    NotConfigured {
        /// The chain that was looked up
        chain_id: u64,
        /// The token symbol that was looked up
        token_symbol: String,
    },
    /// An error reading a registry file
    #[error("error loading vault registry: {0}")]
    Load(String),
    /// An error parsing a registry file
    #[error("error parsing vault registry: {0}")]
    Parse(String),
}

#[allow(clippy::needless_pass_by_value)]
impl VaultError {
    /// Create a new not-configured error
    pub fn not_configured<T: ToString>(chain_id: u64, token_symbol: T) -> Self {
        VaultError::NotConfigured { chain_id, token_symbol: token_symbol.to_string() }
    }

    /// Create a new load error
    pub fn load<T: ToString>(e: T) -> Self {
        VaultError::Load(e.to_string())
    }

    /// Create a new parse error
    pub fn parse<T: ToString>(e: T) -> Self {
        VaultError::Parse(e.to_string())
    }
}
