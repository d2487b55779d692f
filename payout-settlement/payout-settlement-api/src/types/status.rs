//! Status query types for submitted cross-chain swaps

use std::fmt::Display;

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::serialization::chain_id_string_serialization;

/// The query parameters of a status request.
///
/// The router pairs the transaction hash with the original request id to
/// disambiguate retried quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusParams {
    /// The hash of the source-chain swap transaction
    pub transaction_id: TxHash,
    /// The correlation id returned with the route
    pub request_id: String,
    /// The source chain id
    #[serde(with = "chain_id_string_serialization")]
    pub from_chain_id: u64,
    /// The destination chain id
    #[serde(with = "chain_id_string_serialization")]
    pub to_chain_id: u64,
}

/// The router's view of a cross-chain transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterTransactionStatus {
    /// The transfer and any post-hook completed
    Success,
    /// The transfer completed but the destination leg fell back to a refund
    /// or an intermediate token
    PartialSuccess,
    /// The destination leg is stuck waiting for gas
    NeedsGas,
    /// The router has not indexed the transaction
    NotFound,
    /// The transfer is in flight
    Pending,
    /// A status this client does not know about, treated as in flight
    #[serde(other)]
    Unknown,
}

impl RouterTransactionStatus {
    /// Whether the transfer has reached a final state on the router
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::PartialSuccess | Self::NeedsGas)
    }

    /// Whether the transfer delivered funds on the destination chain
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::PartialSuccess)
    }
}

impl Display for RouterTransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::PartialSuccess => write!(f, "partial_success"),
            Self::NeedsGas => write!(f, "needs_gas"),
            Self::NotFound => write!(f, "not_found"),
            Self::Pending => write!(f, "pending"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A chain-side reference to one leg of the transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTransactionInfo {
    /// The leg's transaction hash
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// A block explorer link for the leg
    #[serde(default)]
    pub transaction_url: Option<String>,
}

/// The body of a status response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// The router's status for the transfer
    pub squid_transaction_status: RouterTransactionStatus,
    /// The source leg
    #[serde(default)]
    pub from_chain: Option<ChainTransactionInfo>,
    /// The destination leg
    #[serde(default)]
    pub to_chain: Option<ChainTransactionInfo>,
    /// A cross-chain explorer link, when the transfer went over GMP
    #[serde(default)]
    pub axelar_transaction_url: Option<String>,
}

impl StatusResponse {
    /// The destination-chain transaction hash, once known
    pub fn destination_transaction(&self) -> Option<&str> {
        self.to_chain.as_ref().and_then(|leg| leg.transaction_id.as_deref())
    }
}
