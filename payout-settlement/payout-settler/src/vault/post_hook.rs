//! Builds the post-hook that escrows settled funds in a payout vault

use alloy_primitives::U256;
use payout_settlement_api::{CallType, ChainType, HookCall, HookCallPayload, Payout, PostHook};
use tracing::info;

use super::{
    abi::{encode_approve, encode_deposit, APPROVE_AMOUNT_POSITION, DEPOSIT_AMOUNT_POSITION},
    VaultRegistry,
};

// -------------
// | Constants |
// -------------

/// The gas estimate for the vault approval call
const APPROVE_GAS_ESTIMATE: u64 = 50_000;
/// The gas estimate for the vault deposit call
const DEPOSIT_GAS_ESTIMATE: u64 = 150_000;

/// The provider name shown for the hook
const HOOK_PROVIDER: &str = "Payout Vault";
/// The description shown for the hook
const HOOK_DESCRIPTION: &str = "Deposit settled funds into the payout escrow vault";
/// The logo shown for the hook
const HOOK_LOGO_URI: &str = "";

/// Create the post-hook that deposits a payout's destination tokens into the
/// vault for its destination chain and token.
///
/// The hook approves the vault for the destination token, then deposits the
/// full received balance on behalf of the commerce. The router substitutes the
/// received balance into the deposit's amount argument, so the encoded amount
/// is a zero placeholder.
///
/// Returns `None` when no vault is deployed for the destination; settlement
/// then proceeds without escrow
pub fn create_vault_post_hook(registry: &VaultRegistry, payout: &Payout) -> Option<PostHook> {
    let vault = match registry.vault_address(payout.to_chain, &payout.to_token_symbol) {
        Ok(vault) => vault,
        Err(e) => {
            info!("settling payout {} without escrow: {e}", payout.id);
            return None;
        },
    };

    let token = payout.to_token_address;
    let approve = HookCall {
        chain_type: ChainType::Evm,
        call_type: CallType::Default,
        target: token,
        value: U256::ZERO,
        call_data: encode_approve(vault, U256::MAX),
        payload: HookCallPayload { token_address: token, input_pos: APPROVE_AMOUNT_POSITION },
        estimated_gas: U256::from(APPROVE_GAS_ESTIMATE),
    };

    let deposit = HookCall {
        chain_type: ChainType::Evm,
        call_type: CallType::FullTokenBalance,
        target: vault,
        value: U256::ZERO,
        call_data: encode_deposit(payout.from_address, U256::ZERO, &payout.id),
        payload: HookCallPayload { token_address: token, input_pos: DEPOSIT_AMOUNT_POSITION },
        estimated_gas: U256::from(DEPOSIT_GAS_ESTIMATE),
    };

    Some(PostHook {
        chain_type: ChainType::Evm,
        calls: vec![approve, deposit],
        provider: HOOK_PROVIDER.to_string(),
        description: HOOK_DESCRIPTION.to_string(),
        logo_uri: HOOK_LOGO_URI.to_string(),
    })
}
