//! Payout records as served by the payout backend

use std::fmt::Display;

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serialization::decimal_amount_serialization;

/// The lifecycle status of a payout, owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    /// Created, not yet funded
    Pending,
    /// Funds have been escrowed for the recipient
    Funded,
    /// A settlement is in flight
    Processing,
    /// The recipient has claimed the funds
    Claimed,
    /// The payout failed
    Failed,
    /// A status this client does not know about
    #[serde(other)]
    Unknown,
}

impl Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutStatus::Pending => write!(f, "pending"),
            PayoutStatus::Funded => write!(f, "funded"),
            PayoutStatus::Processing => write!(f, "processing"),
            PayoutStatus::Claimed => write!(f, "claimed"),
            PayoutStatus::Failed => write!(f, "failed"),
            PayoutStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A payout record.
///
/// Treated as an immutable snapshot for the duration of a settlement attempt;
/// the settler reads it but never writes it back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    /// The unique payout id
    pub id: String,

    // --- Source Leg --- //
    /// The amount debited from the commerce, in display units
    #[serde(with = "decimal_amount_serialization")]
    pub from_amount: BigDecimal,
    /// The fiat currency the source amount is denominated in
    pub from_currency: String,
    /// The source chain id
    pub from_chain: u64,
    /// The human-readable source chain name
    #[serde(default)]
    pub from_chain_name: String,
    /// The symbol of the source token
    pub from_token_symbol: String,
    /// The source token contract
    pub from_token_address: Address,
    /// The decimal precision of the source token
    pub from_token_decimals: u8,
    /// The commerce wallet funding the payout
    pub from_address: Address,

    // --- Destination Leg --- //
    /// The amount the recipient receives, in display units
    #[serde(with = "decimal_amount_serialization")]
    pub to_amount: BigDecimal,
    /// The fiat currency the destination amount is denominated in
    pub to_currency: String,
    /// The destination chain id
    pub to_chain: u64,
    /// The human-readable destination chain name
    #[serde(default)]
    pub to_chain_name: String,
    /// The symbol of the destination token
    pub to_token_symbol: String,
    /// The destination token contract
    pub to_token_address: Address,
    /// The decimal precision of the destination token
    pub to_token_decimals: u8,
    /// The recipient's name
    pub to_name: String,
    /// The recipient's email
    pub to_email: String,
    /// The recipient's wallet, unset until the payout is claimed
    #[serde(default)]
    pub to_address: Option<Address>,

    // --- Lifecycle --- //
    /// The payout status
    pub status: PayoutStatus,
    /// When the payout was created
    pub created_at: DateTime<Utc>,
    /// When the payout was claimed
    #[serde(default)]
    pub claimed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    /// A payout as returned by the backend
    const PAYOUT_JSON: &str = r#"{
        "id": "po_123",
        "from_amount": 1000.50,
        "from_currency": "USD",
        "from_chain": 42161,
        "from_chain_name": "Arbitrum One",
        "from_token_symbol": "USDC",
        "from_token_address": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
        "from_token_decimals": 6,
        "from_address": "0x1111111111111111111111111111111111111111",
        "to_amount": 4200000,
        "to_currency": "COP",
        "to_chain": 42220,
        "to_chain_name": "Celo",
        "to_token_symbol": "cCOP",
        "to_token_address": "0x8A567e2aE79CA692Bd748aB832081C45de4041eA",
        "to_token_decimals": 18,
        "to_name": "Ana",
        "to_email": "ana@example.com",
        "to_address": null,
        "status": "pending",
        "created_at": "2025-01-10T12:00:00Z",
        "claimed_at": null
    }"#;

    #[test]
    fn test_deserialize_backend_payout() {
        let payout: Payout = serde_json::from_str(PAYOUT_JSON).unwrap();

        assert_eq!(payout.from_amount, BigDecimal::from_str("1000.5").unwrap());
        assert_eq!(payout.to_amount, BigDecimal::from(4_200_000));
        assert_eq!(payout.from_chain, 42161);
        assert_eq!(payout.to_token_decimals, 18);
        assert_eq!(payout.status, PayoutStatus::Pending);
        assert!(payout.to_address.is_none());
        assert!(payout.claimed_at.is_none());
    }

    #[test]
    fn test_unknown_status() {
        let json = PAYOUT_JSON.replace("\"pending\"", "\"expired\"");
        let payout: Payout = serde_json::from_str(&json).unwrap();
        assert_eq!(payout.status, PayoutStatus::Unknown);
    }
}
