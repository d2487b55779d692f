//! Call encoding for the token and escrow vault contracts
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// The subset of the ERC20 interface used for settlement
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// The escrow vault holding settled payouts until they are claimed
    interface IPayoutVault {
        function deposit(address commerce, uint256 amount, string payoutId) external;
    }
}

/// The argument index of the amount in `approve(address,uint256)`
pub const APPROVE_AMOUNT_POSITION: u32 = 1;
/// The argument index of the amount in `deposit(address,uint256,string)`
pub const DEPOSIT_AMOUNT_POSITION: u32 = 1;

/// Encode an ERC20 `approve` call
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// Encode a vault `deposit` call crediting `commerce` for `payout_id`
pub fn encode_deposit(commerce: Address, amount: U256, payout_id: &str) -> Bytes {
    IPayoutVault::depositCall { commerce, amount, payoutId: payout_id.to_string() }
        .abi_encode()
        .into()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{hex, keccak256};

    use super::*;

    /// The well-known selector of `approve(address,uint256)`
    const APPROVE_SELECTOR: [u8; 4] = hex!("095ea7b3");

    #[test]
    fn test_approve_encoding() {
        let spender = Address::repeat_byte(0x42);
        let data = encode_approve(spender, U256::MAX);

        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(data[..4], APPROVE_SELECTOR);
        // Address is left-padded into the first word
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(&data[16..36], spender.as_slice());
        // Max approval fills the second word
        assert_eq!(&data[36..68], &[0xffu8; 32]);
    }

    #[test]
    fn test_deposit_selector() {
        let expected = keccak256("deposit(address,uint256,string)");
        assert_eq!(IPayoutVault::depositCall::SELECTOR, expected[..4]);
    }

    #[test]
    fn test_deposit_round_trip() {
        let commerce = Address::repeat_byte(0x07);
        let data = encode_deposit(commerce, U256::ZERO, "po_123");

        let decoded = IPayoutVault::depositCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.commerce, commerce);
        assert_eq!(decoded.amount, U256::ZERO);
        assert_eq!(decoded.payoutId, "po_123");
    }

    #[test]
    fn test_deposit_layout() {
        let data = encode_deposit(Address::ZERO, U256::from(5u64), "abc");

        // selector + commerce + amount + string offset + string length + padded bytes
        assert_eq!(data.len(), 4 + 32 * 5);
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(5u64));
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::from(0x60u64));
        assert_eq!(U256::from_be_slice(&data[100..132]), U256::from(3u64));
        assert_eq!(&data[132..135], b"abc");
    }
}
