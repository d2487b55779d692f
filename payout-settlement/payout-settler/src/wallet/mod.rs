//! The wallet boundary: signs and broadcasts transactions on behalf of the
//! commerce.
//!
//! Submission returns as soon as a transaction is broadcast; confirmation of
//! the cross-chain transfer is tracked by the status poller

pub mod local;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

/// A transaction to sign and broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletTransaction {
    /// The recipient contract
    pub to: Address,
    /// The call data
    pub data: Bytes,
    /// The native value sent
    pub value: U256,
    /// The chain to broadcast on
    pub chain_id: u64,
}

/// An error submitting a transaction through the wallet
#[derive(Debug, Clone, thiserror::Error)]
pub enum WalletError {
    /// No wallet is connected
    #[error("wallet not connected")]
    NotConnected,
    /// The wallet cannot reach the requested chain
    #[error("wallet does not support chain {0}")]
    UnsupportedChain(u64),
    /// The signer refused the transaction
    #[error("transaction rejected: {0}")]
    Rejected(String),
    /// The transaction could not be broadcast
    #[error("broadcast failed: {0}")]
    Broadcast(String),
    /// An error setting up the wallet
    #[error("wallet setup error: {0}")]
    Setup(String),
}

#[allow(clippy::needless_pass_by_value)]
impl WalletError {
    /// Create a new rejected error
    pub fn rejected<T: ToString>(e: T) -> Self {
        WalletError::Rejected(e.to_string())
    }

    /// Create a new broadcast error
    pub fn broadcast<T: ToString>(e: T) -> Self {
        WalletError::Broadcast(e.to_string())
    }

    /// Create a new setup error
    pub fn setup<T: ToString>(e: T) -> Self {
        WalletError::Setup(e.to_string())
    }
}

/// A wallet able to submit transactions
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// The connected account, if any
    fn address(&self) -> Option<Address>;

    /// Sign and broadcast a transaction, returning its hash.
    ///
    /// Fails with `WalletError::NotConnected` if no account is connected
    async fn send_transaction(&self, tx: WalletTransaction) -> Result<TxHash, WalletError>;
}
