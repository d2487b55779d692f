//! Translates payouts into router requests and fetches executable routes

use alloy_primitives::{Address, U256};
use payout_settlement_api::{Payout, RouteParams};
use tracing::{info, instrument};

use crate::{
    helpers::to_base_units,
    router_client::{error::RouterError, RouteQuote, RouterApi},
    vault::{post_hook::create_vault_post_hook, VaultRegistry},
};

/// An error planning a route
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The payout cannot be expressed as a route
    #[error("invalid payout: {0}")]
    InvalidPayout(String),
    /// The router failed to produce a route
    #[error("routing failed: {0}")]
    Router(#[from] RouterError),
}

/// A route planned for a payout
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    /// The parameters the route was requested with
    pub params: RouteParams,
    /// The router's quote
    pub quote: RouteQuote,
}

impl PlannedRoute {
    /// The amount sold, in base units of the source token
    pub fn from_amount(&self) -> U256 {
        self.params.from_amount
    }

    /// The router's correlation id
    pub fn request_id(&self) -> &str {
        &self.quote.request_id
    }
}

/// Plans routes for payouts, escrowing the proceeds in a vault when one is
/// deployed for the destination
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    /// The vault registry used to build post-hooks
    registry: VaultRegistry,
}

impl RoutePlanner {
    /// Constructor
    pub fn new(registry: VaultRegistry) -> Self {
        Self { registry }
    }

    /// Build the route parameters for a payout.
    ///
    /// The swap delivers to `to_address`, defaulting to the commerce itself.
    /// When a post-hook is attached the recipient is the account that
    /// approves the vault, so any other destination is rejected
    pub fn create_route_params(
        &self,
        payout: &Payout,
        to_address: Option<Address>,
    ) -> Result<RouteParams, PlanError> {
        let from_amount = to_base_units(&payout.from_amount, payout.from_token_decimals)
            .map_err(|e| PlanError::InvalidPayout(e.to_string()))?;
        if from_amount.is_zero() {
            return Err(PlanError::InvalidPayout(format!(
                "amount {} rounds to zero base units",
                payout.from_amount
            )));
        }

        // The vault deposit pulls from the recipient, so a hooked swap must
        // deliver to the commerce
        let to_address = to_address.unwrap_or(payout.from_address);
        let post_hook = create_vault_post_hook(&self.registry, payout);
        if post_hook.is_some() && to_address != payout.from_address {
            return Err(PlanError::InvalidPayout(format!(
                "destination {to_address} must be the commerce {} when depositing into a vault",
                payout.from_address
            )));
        }

        Ok(RouteParams {
            from_address: payout.from_address,
            from_chain: payout.from_chain,
            from_token: payout.from_token_address,
            from_amount,
            to_chain: payout.to_chain,
            to_token: payout.to_token_address,
            to_address,
            enable_forecall: true,
            quote_only: false,
            post_hook,
        })
    }

    /// Plan and request a route for a payout.
    ///
    /// Route requests are not retried; a stale or failed quote aborts the
    /// settlement attempt
    #[instrument(skip_all, fields(payout_id = %payout.id))]
    pub async fn plan_route(
        &self,
        router: &dyn RouterApi,
        payout: &Payout,
        to_address: Option<Address>,
    ) -> Result<PlannedRoute, PlanError> {
        let params = self.create_route_params(payout, to_address)?;
        let quote = router.get_route(&params).await?;

        info!(request_id = %quote.request_id, "planned route for payout");
        Ok(PlannedRoute { params, quote })
    }
}
