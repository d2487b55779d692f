//! Route request and response types for the cross-chain router

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::{
    serialization::{chain_id_string_serialization, u256_string_serialization},
    types::hook::PostHook,
};

/// The action type the router reports for request-for-quote fills
pub const RFQ_ACTION_TYPE: &str = "rfq";

// -----------
// | Request |
// -----------

/// The parameters of a route request.
///
/// Built fresh for every settlement attempt and discarded once the route is
/// obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    /// The address funding the swap
    pub from_address: Address,
    /// The source chain id
    #[serde(with = "chain_id_string_serialization")]
    pub from_chain: u64,
    /// The token sold on the source chain
    pub from_token: Address,
    /// The amount sold, in base units of the source token
    #[serde(with = "u256_string_serialization")]
    pub from_amount: U256,
    /// The destination chain id
    #[serde(with = "chain_id_string_serialization")]
    pub to_chain: u64,
    /// The token bought on the destination chain
    pub to_token: Address,
    /// The address receiving the bought tokens
    pub to_address: Address,
    /// Whether the router may front the destination leg before source
    /// finality
    pub enable_forecall: bool,
    /// Whether to request a quote without transaction data
    pub quote_only: bool,
    /// Calls executed on the destination chain after the transfer lands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_hook: Option<PostHook>,
}

// ------------
// | Response |
// ------------

/// The transaction that executes the source leg of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTransactionRequest {
    /// The router contract the swap is sent to
    pub target: Address,
    /// The swap call data
    pub data: Bytes,
    /// The native value sent with the swap
    #[serde(with = "u256_string_serialization")]
    pub value: U256,
    /// The router's gas limit estimate
    #[serde(default)]
    pub gas_limit: Option<String>,
    /// The router's gas price estimate
    #[serde(default)]
    pub gas_price: Option<String>,
}

/// A bridge or DEX action taken by a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAction {
    /// The action type, e.g. `swap`, `bridge`, or `rfq`
    #[serde(rename = "type")]
    pub action_type: String,
    /// The provider executing the action
    #[serde(default)]
    pub provider: Option<String>,
}

impl RouteAction {
    /// Whether the action is a request-for-quote fill
    pub fn is_rfq(&self) -> bool {
        self.action_type.eq_ignore_ascii_case(RFQ_ACTION_TYPE)
    }
}

/// The router's cost and duration estimate for a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimate {
    /// The amount sold, in base units
    pub from_amount: String,
    /// The amount bought, in base units
    pub to_amount: String,
    /// The quoted exchange rate
    #[serde(default)]
    pub exchange_rate: Option<String>,
    /// The estimated route duration in seconds
    #[serde(default)]
    pub estimated_route_duration: u64,
    /// The actions the route takes
    #[serde(default)]
    pub actions: Vec<RouteAction>,
}

/// An executable route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// The transaction executing the route
    pub transaction_request: RouteTransactionRequest,
    /// The route's estimate
    pub estimate: RouteEstimate,
}

impl Route {
    /// Whether any of the route's actions is a request-for-quote fill
    pub fn has_rfq_action(&self) -> bool {
        self.estimate.actions.iter().any(RouteAction::is_rfq)
    }
}

/// The body of a route response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// The route found by the router
    pub route: Route,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_route_params_wire_layout() {
        let params = RouteParams {
            from_address: Address::repeat_byte(0x01),
            from_chain: 42161,
            from_token: Address::repeat_byte(0x02),
            from_amount: U256::from(1_000_500_000u64),
            to_chain: 42220,
            to_token: Address::repeat_byte(0x03),
            to_address: Address::repeat_byte(0x04),
            enable_forecall: true,
            quote_only: false,
            post_hook: None,
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["fromChain"], json!("42161"));
        assert_eq!(value["toChain"], json!("42220"));
        assert_eq!(value["fromAmount"], json!("1000500000"));
        assert_eq!(value["enableForecall"], json!(true));
        assert_eq!(value["quoteOnly"], json!(false));
        assert!(value.get("postHook").is_none());
    }

    #[test]
    fn test_parse_route_response() {
        let body = json!({
            "route": {
                "transactionRequest": {
                    "target": "0xce16F69375520ab01377ce7B88f5BA8C48F8D666",
                    "data": "0x846a1bc6",
                    "value": "0",
                    "gasLimit": "410000",
                    "gasPrice": "10000000"
                },
                "estimate": {
                    "fromAmount": "1000500000",
                    "toAmount": "4200000000000000000000000",
                    "exchangeRate": "4197.9",
                    "estimatedRouteDuration": 20,
                    "actions": [
                        { "type": "swap", "provider": "Uniswap V3" },
                        { "type": "rfq", "provider": "Coral" }
                    ]
                }
            }
        });

        let response: RouteResponse = serde_json::from_value(body).unwrap();
        let route = response.route;
        assert_eq!(route.transaction_request.value, U256::ZERO);
        assert_eq!(route.transaction_request.data.as_ref(), &[0x84, 0x6a, 0x1b, 0xc6]);
        assert_eq!(route.estimate.estimated_route_duration, 20);
        assert!(route.has_rfq_action());
    }

    #[test]
    fn test_route_without_actions_is_not_rfq() {
        let body = json!({
            "route": {
                "transactionRequest": {
                    "target": "0xce16F69375520ab01377ce7B88f5BA8C48F8D666",
                    "data": "0x",
                    "value": "0"
                },
                "estimate": { "fromAmount": "1", "toAmount": "1" }
            }
        });

        let response: RouteResponse = serde_json::from_value(body).unwrap();
        assert!(!response.route.has_rfq_action());
    }
}
