//! Test doubles for the router and the wallet, and fixtures shared across
//! tests

use std::{collections::VecDeque, str::FromStr};

use alloy_primitives::{address, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use payout_settlement_api::{
    ChainTransactionInfo, Payout, PayoutStatus, Route, RouteAction, RouteEstimate, RouteParams,
    RouteResponse, RouteTransactionRequest, RouterTransactionStatus, StatusParams, StatusResponse,
};
use tokio::sync::Mutex;

use crate::{
    router_client::{error::RouterError, RouteQuote, RouterApi},
    vault::{VaultConfig, VaultNetwork, VaultRegistry, VaultToken},
    wallet::{TransactionSubmitter, WalletError, WalletTransaction},
};

// -------------
// | Constants |
// -------------

/// The vault deployed in the test registry
pub const MOCK_VAULT: Address = address!("7a11e70000000000000000000000000000000001");
/// The request id the mock router assigns to routes
pub const MOCK_REQUEST_ID: &str = "mock-request-id";
/// The router contract the mock route executes against
pub const MOCK_ROUTER_TARGET: Address = address!("ce16f69375520ab01377ce7b88f5ba8c48f8d666");

/// USDC on Arbitrum One
const USDC_ARBITRUM: Address = address!("af88d065e77c8cC2239327C5EDb3A432268e5831");
/// cCOP on Celo
const CCOP_CELO: Address = address!("8A567e2aE79CA692Bd748aB832081C45de4041eA");
/// The commerce funding the mock payout
const COMMERCE: Address = address!("c0cc0c0cc0cc0cc0cc0cc0cc0cc0cc0cc0cc0cc0");

// ------------
// | Fixtures |
// ------------

/// A payout of 1000.50 USDC on Arbitrum, settled as cCOP on Celo
pub fn mock_payout() -> Payout {
    Payout {
        id: "po_123".to_string(),
        from_amount: BigDecimal::from_str("1000.50").unwrap(),
        from_currency: "USD".to_string(),
        from_chain: 42161,
        from_chain_name: "Arbitrum One".to_string(),
        from_token_symbol: "USDC".to_string(),
        from_token_address: USDC_ARBITRUM,
        from_token_decimals: 6,
        from_address: COMMERCE,
        to_amount: BigDecimal::from_str("4200000").unwrap(),
        to_currency: "COP".to_string(),
        to_chain: 42220,
        to_chain_name: "Celo".to_string(),
        to_token_symbol: "cCOP".to_string(),
        to_token_address: CCOP_CELO,
        to_token_decimals: 18,
        to_name: "Ana".to_string(),
        to_email: "ana@example.com".to_string(),
        to_address: Some(Address::repeat_byte(0xab)),
        status: PayoutStatus::Pending,
        created_at: Utc::now(),
        claimed_at: None,
    }
}

/// A registry with a deployed cCOP vault on Celo
pub fn registry_with_vault() -> VaultRegistry {
    VaultRegistry::new(vec![VaultConfig {
        network_key: "celo".to_string(),
        address: MOCK_VAULT,
        token: VaultToken { address: CCOP_CELO, symbol: "cCOP".to_string(), decimals: 18 },
        network: VaultNetwork { chain_id: 42220, name: "Celo".to_string() },
    }])
}

/// A route bridged over general message passing
pub fn mock_route() -> Route {
    Route {
        transaction_request: RouteTransactionRequest {
            target: MOCK_ROUTER_TARGET,
            data: Bytes::from_static(&[0x84, 0x6a, 0x1b, 0xc6, 0x01, 0x02]),
            value: U256::from(1_000_000_000_000u64),
            gas_limit: Some("600000".to_string()),
            gas_price: None,
        },
        estimate: RouteEstimate {
            from_amount: "1000500000".to_string(),
            to_amount: "4200000000000000000000000".to_string(),
            exchange_rate: Some("4197.9".to_string()),
            estimated_route_duration: 20,
            actions: vec![
                RouteAction { action_type: "swap".to_string(), provider: None },
                RouteAction { action_type: "bridge".to_string(), provider: None },
            ],
        },
    }
}

/// Route parameters for the mock payout, without a post-hook
pub fn mock_route_params() -> RouteParams {
    RouteParams {
        from_address: COMMERCE,
        from_chain: 42161,
        from_token: USDC_ARBITRUM,
        from_amount: U256::from(1_000_500_000u64),
        to_chain: 42220,
        to_token: CCOP_CELO,
        to_address: COMMERCE,
        enable_forecall: true,
        quote_only: false,
        post_hook: None,
    }
}

// ---------------
// | Mock Router |
// ---------------

/// A scripted reply to a status query
#[derive(Debug, Clone)]
pub enum StatusReply {
    /// The router answers with HTTP 404
    HttpNotFound,
    /// The router reports the given status
    Status(RouterTransactionStatus),
    /// The request fails
    Error(RouterError),
}

/// A router that answers route requests with a fixed reply and status queries
/// from a script. Once the script runs out every query reports `pending`
pub struct MockRouter {
    /// The reply to every route request
    route_reply: Result<RouteQuote, RouterError>,
    /// The remaining scripted status replies
    statuses: Mutex<VecDeque<StatusReply>>,
    /// The route requests received
    route_requests: Mutex<Vec<RouteParams>>,
    /// The status queries received
    status_requests: Mutex<Vec<StatusParams>>,
}

impl Default for MockRouter {
    fn default() -> Self {
        let quote = RouteQuote {
            response: RouteResponse { route: mock_route() },
            request_id: MOCK_REQUEST_ID.to_string(),
        };

        Self {
            route_reply: Ok(quote),
            statuses: Mutex::new(VecDeque::new()),
            route_requests: Mutex::new(Vec::new()),
            status_requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockRouter {
    /// A router that replies to status queries from the given script
    pub fn with_statuses(replies: Vec<StatusReply>) -> Self {
        Self { statuses: Mutex::new(replies.into()), ..Default::default() }
    }

    /// A router whose transfers never complete
    pub fn pending_forever() -> Self {
        Self::default()
    }

    /// Fail every route request with the given error
    pub fn with_route_error(self, e: RouterError) -> Self {
        Self { route_reply: Err(e), ..self }
    }

    /// The route requests received so far
    pub async fn route_requests(&self) -> Vec<RouteParams> {
        self.route_requests.lock().await.clone()
    }

    /// The status queries received so far
    pub async fn status_requests(&self) -> Vec<StatusParams> {
        self.status_requests.lock().await.clone()
    }

    /// The number of status queries received so far
    pub async fn status_queries(&self) -> usize {
        self.status_requests.lock().await.len()
    }
}

/// Build a status response with the given status
fn status_response(status: RouterTransactionStatus) -> StatusResponse {
    StatusResponse {
        squid_transaction_status: status,
        from_chain: None,
        to_chain: Some(ChainTransactionInfo {
            transaction_id: Some("0xdestination".to_string()),
            transaction_url: None,
        }),
        axelar_transaction_url: None,
    }
}

#[async_trait]
impl RouterApi for MockRouter {
    async fn get_route(&self, params: &RouteParams) -> Result<RouteQuote, RouterError> {
        self.route_requests.lock().await.push(params.clone());
        self.route_reply.clone()
    }

    async fn get_status(&self, params: &StatusParams) -> Result<StatusResponse, RouterError> {
        self.status_requests.lock().await.push(params.clone());

        let reply = self
            .statuses
            .lock()
            .await
            .pop_front()
            .unwrap_or(StatusReply::Status(RouterTransactionStatus::Pending));
        match reply {
            StatusReply::HttpNotFound => Err(RouterError::NotFound),
            StatusReply::Status(status) => Ok(status_response(status)),
            StatusReply::Error(e) => Err(e),
        }
    }
}

// ---------------
// | Mock Wallet |
// ---------------

/// A wallet that records the transactions it is asked to submit
pub struct MockWallet {
    /// The connected account
    address: Option<Address>,
    /// The transactions submitted
    sent: Mutex<Vec<WalletTransaction>>,
    /// A submission index at which to fail, with the error to fail with
    failure: Option<(usize, WalletError)>,
}

impl MockWallet {
    /// A connected wallet
    pub fn connected() -> Self {
        Self { address: Some(COMMERCE), sent: Mutex::new(Vec::new()), failure: None }
    }

    /// A wallet with no connected account
    pub fn disconnected() -> Self {
        Self { address: None, ..Self::connected() }
    }

    /// Fail the `index`th submission
    pub fn fail_on(self, index: usize, e: WalletError) -> Self {
        Self { failure: Some((index, e)), ..self }
    }

    /// The hash returned for the `index`th submission
    pub fn hash_for(index: usize) -> TxHash {
        TxHash::with_last_byte(index as u8 + 1)
    }

    /// The transactions submitted so far
    pub async fn sent(&self) -> Vec<WalletTransaction> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl TransactionSubmitter for MockWallet {
    fn address(&self) -> Option<Address> {
        self.address
    }

    async fn send_transaction(&self, tx: WalletTransaction) -> Result<TxHash, WalletError> {
        if self.address.is_none() {
            return Err(WalletError::NotConnected);
        }

        let mut sent = self.sent.lock().await;
        let index = sent.len();
        if let Some((fail_index, e)) = &self.failure {
            if *fail_index == index {
                return Err(e.clone());
            }
        }

        sent.push(tx);
        Ok(Self::hash_for(index))
    }
}
