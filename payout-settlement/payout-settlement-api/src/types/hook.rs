//! Post-settlement hooks executed by the router on the destination chain

use alloy_primitives::{Address, Bytes, U256};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use crate::serialization::u256_string_serialization;

/// The chain family a hook call runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    /// An EVM chain
    #[default]
    Evm,
}

/// How the router executes a hook call.
///
/// Encoded on the wire as the router's integer call type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CallType {
    /// Execute the call data as-is
    Default = 0,
    /// Patch the amount parameter with the full token balance received
    FullTokenBalance = 1,
    /// Patch the amount parameter with the full native balance received
    FullNativeBalance = 2,
    /// Sweep the token balance into the multicall before executing
    CollectTokenBalance = 3,
}

impl Serialize for CallType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for CallType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match u8::deserialize(d)? {
            0 => Ok(CallType::Default),
            1 => Ok(CallType::FullTokenBalance),
            2 => Ok(CallType::FullNativeBalance),
            3 => Ok(CallType::CollectTokenBalance),
            other => Err(D::Error::custom(format!("unknown call type: {other}"))),
        }
    }
}

/// Tells the router which token balance to substitute and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookCallPayload {
    /// The token whose received balance is substituted
    pub token_address: Address,
    /// The index of the amount parameter in the call's arguments
    pub input_pos: u32,
}

/// A single call in a post-hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookCall {
    /// The chain family of the call
    pub chain_type: ChainType,
    /// How the router should execute the call
    pub call_type: CallType,
    /// The contract the call is sent to
    pub target: Address,
    /// The native value sent with the call
    #[serde(with = "u256_string_serialization")]
    pub value: U256,
    /// The ABI-encoded call data
    pub call_data: Bytes,
    /// The amount substitution instructions
    pub payload: HookCallPayload,
    /// The gas the call is estimated to use
    #[serde(with = "u256_string_serialization")]
    pub estimated_gas: U256,
}

/// An ordered sequence of calls the router executes once the cross-chain
/// transfer lands on the destination chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHook {
    /// The chain family of the hook
    pub chain_type: ChainType,
    /// The calls, executed in order
    pub calls: Vec<HookCall>,
    /// The name shown for the hook's provider
    pub provider: String,
    /// A description of what the hook does
    pub description: String,
    /// A logo for the hook's provider
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Call types serialize to the router's integer codes
    #[test]
    fn test_call_type_codes() {
        assert_eq!(serde_json::to_value(CallType::Default).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(CallType::FullTokenBalance).unwrap(), json!(1));

        let parsed: CallType = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(parsed, CallType::CollectTokenBalance);
        assert!(serde_json::from_value::<CallType>(json!(7)).is_err());
    }

    /// A hook call matches the router's camelCase wire layout
    #[test]
    fn test_hook_call_layout() {
        let call = HookCall {
            chain_type: ChainType::Evm,
            call_type: CallType::FullTokenBalance,
            target: Address::repeat_byte(0x11),
            value: U256::ZERO,
            call_data: Bytes::from(vec![0xde, 0xad]),
            payload: HookCallPayload { token_address: Address::repeat_byte(0x22), input_pos: 1 },
            estimated_gas: U256::from(150_000u64),
        };

        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["chainType"], json!("evm"));
        assert_eq!(value["callType"], json!(1));
        assert_eq!(value["value"], json!("0"));
        assert_eq!(value["callData"], json!("0xdead"));
        assert_eq!(value["payload"]["inputPos"], json!(1));
        assert_eq!(value["estimatedGas"], json!("150000"));
    }
}
