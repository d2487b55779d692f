//! Helpers for the payout settler

use alloy_primitives::{TxHash, U256};
use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal,
};
use payout_settlement_api::Route;

// -------------
// | Constants |
// -------------

/// The explorer used for routes filled through a request-for-quote
const RFQ_EXPLORER_URL: &str = "https://coralscan.squidrouter.com/tx";
/// The explorer used for routes bridged over general message passing
const GMP_EXPLORER_URL: &str = "https://axelarscan.io/gmp";

// -----------
// | Amounts |
// -----------

/// An error converting a display amount to base units
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount is below zero
    #[error("amount must be non-negative, got {0}")]
    Negative(String),
    /// The amount's precision cannot be scaled to the token's decimals
    #[error("decimal exponent out of range: {0}")]
    ExponentOutOfRange(i64),
    /// The amount does not fit in a `uint256`
    #[error("amount overflows 256 bits: {0}")]
    Overflow(String),
}

#[allow(clippy::needless_pass_by_value)]
impl AmountError {
    /// Create a new negative amount error
    pub fn negative<T: ToString>(amount: T) -> Self {
        AmountError::Negative(amount.to_string())
    }

    /// Create a new overflow error
    pub fn overflow<T: ToString>(amount: T) -> Self {
        AmountError::Overflow(amount.to_string())
    }
}

/// Convert a display amount to integer base units of a token with the given
/// precision.
///
/// Computes `floor(amount * 10^decimals)` in exact decimal arithmetic; the
/// fractional remainder is truncated, never rounded up
pub fn to_base_units(amount: &BigDecimal, decimals: u8) -> Result<U256, AmountError> {
    // amount = digits * 10^-scale, so base units = digits * 10^(decimals - scale)
    let (digits, scale) = amount.as_bigint_and_exponent();
    if digits.sign() == Sign::Minus {
        return Err(AmountError::negative(amount));
    }

    let shift = i64::from(decimals) - scale;
    let base_units = if shift >= 0 {
        digits * pow10(shift)?
    } else {
        // Non-negative integer division truncates, i.e. floors
        digits / pow10(-shift)?
    };

    U256::from_str_radix(&base_units.to_str_radix(10), 10).map_err(|_| AmountError::overflow(amount))
}

/// Compute `10^exp` as a big integer
fn pow10(exp: i64) -> Result<BigInt, AmountError> {
    let exp = u32::try_from(exp).map_err(|_| AmountError::ExponentOutOfRange(exp))?;
    Ok(BigInt::from(10u8).pow(exp))
}

// ------------
// | Explorer |
// ------------

/// Get the explorer URL for a swap transaction, based on how the route was
/// filled
pub fn explorer_url(tx_hash: TxHash, route: &Route) -> String {
    let base = if route.has_rfq_action() { RFQ_EXPLORER_URL } else { GMP_EXPLORER_URL };
    format!("{base}/{tx_hash:#x}")
}
