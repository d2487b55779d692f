//! The settlement state machine.
//!
//! A settlement attempt requests a route, approves the router to spend the
//! source token, submits the swap, and polls the cross-chain transfer until it
//! reaches a terminal status. Attempts are never resumed: any failure ends the
//! attempt in the error state and a retry starts over with a fresh route.
//!
//! Each attempt publishes its transitions to a `StatusPublisher` owned by the
//! caller, so attempts for different payouts may run concurrently on one
//! orchestrator

pub mod status;

use std::{future::Future, sync::Arc};

use alloy_primitives::{Address, TxHash, U256};
use payout_settlement_api::{Payout, StatusParams, StatusResponse};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use self::status::{StatusPublisher, SwapStatus};
use crate::{
    error::SwapError,
    helpers::explorer_url,
    route_planner::{PlannedRoute, RoutePlanner},
    router_client::{
        poller::{poll_status, PollerConfig},
        RouterApi,
    },
    vault::abi::encode_approve,
    wallet::{TransactionSubmitter, WalletError, WalletTransaction},
};

// ------------
// | Messages |
// ------------

/// The status message while a route is requested
const QUOTING_MESSAGE: &str = "Getting optimal route...";
/// The status message while the approval is submitted
const APPROVING_MESSAGE: &str = "Approving token spending...";
/// The status message while the swap is submitted
const SWAPPING_MESSAGE: &str = "Executing swap...";
/// The status message while the transfer is in flight
const POLLING_MESSAGE: &str = "Waiting for cross-chain transfer...";

/// A broadcast swap transaction
#[derive(Clone)]
struct SwapReference {
    /// The swap transaction
    tx_hash: TxHash,
    /// An explorer link for the swap
    explorer_url: String,
}

/// The result of a completed attempt
struct SwapOutcome {
    /// The broadcast swap
    swap: SwapReference,
    /// The router's terminal status
    status: StatusResponse,
}

/// The failure of an attempt, with the swap it broadcast if any
struct AttemptError {
    /// The error that ended the attempt
    error: SwapError,
    /// The swap, if it was broadcast before the failure
    swap: Option<SwapReference>,
}

// ----------------
// | Orchestrator |
// ----------------

/// Settles payouts through the router
pub struct SwapOrchestrator {
    /// The cross-chain router
    router: Arc<dyn RouterApi>,
    /// The wallet submitting the approval and swap
    wallet: Arc<dyn TransactionSubmitter>,
    /// Builds route requests for payouts
    planner: RoutePlanner,
    /// Pacing for status polling
    poller_config: PollerConfig,
}

impl SwapOrchestrator {
    /// Constructor
    pub fn new(
        router: Arc<dyn RouterApi>,
        wallet: Arc<dyn TransactionSubmitter>,
        planner: RoutePlanner,
        poller_config: PollerConfig,
    ) -> Self {
        Self { router, wallet, planner, poller_config }
    }

    /// Settle a payout, delivering the swap to `to_address` or, if unset, to
    /// the commerce's own address.
    ///
    /// Every transition of the attempt is published to `publisher`. Returns
    /// the terminal status; failures are reported as `SwapStatus::Error`
    /// rather than returned
    pub async fn execute_swap(
        &self,
        payout: &Payout,
        to_address: Option<Address>,
        publisher: &StatusPublisher,
    ) -> SwapStatus {
        self.execute_swap_with_cancel(payout, to_address, publisher, &CancellationToken::new())
            .await
    }

    /// Settle a payout, abandoning the attempt if `cancel` fires.
    ///
    /// A cancelled attempt does not undo transactions already broadcast
    #[instrument(skip_all, fields(attempt_id = %Uuid::new_v4(), payout_id = %payout.id))]
    pub async fn execute_swap_with_cancel(
        &self,
        payout: &Payout,
        to_address: Option<Address>,
        publisher: &StatusPublisher,
        cancel: &CancellationToken,
    ) -> SwapStatus {
        publisher.publish(SwapStatus::Idle { message: QUOTING_MESSAGE.to_string() });

        let status = match self.run_attempt(payout, to_address, publisher, cancel).await {
            Ok(SwapOutcome { swap, status }) => {
                let final_status = status.squid_transaction_status;
                let message = if final_status.is_settled() {
                    format!("Swap completed successfully! Status: {final_status}")
                } else {
                    warn!("swap ended without settling: {final_status}");
                    format!("Swap completed without settling. Status: {final_status}")
                };

                SwapStatus::Success {
                    message,
                    tx_hash: swap.tx_hash,
                    explorer_url: swap.explorer_url,
                    final_status,
                }
            },
            Err(AttemptError { error, swap }) => {
                error!("settlement attempt failed: {error}");
                let (tx_hash, explorer_url) = match swap {
                    Some(SwapReference { tx_hash, explorer_url }) => {
                        (Some(tx_hash), Some(explorer_url))
                    },
                    None => (None, None),
                };

                SwapStatus::Error {
                    message: error.to_string(),
                    kind: error.kind(),
                    tx_hash,
                    explorer_url,
                }
            },
        };

        publisher.publish(status.clone());
        status
    }

    /// Run the steps of a settlement attempt
    async fn run_attempt(
        &self,
        payout: &Payout,
        to_address: Option<Address>,
        publisher: &StatusPublisher,
        cancel: &CancellationToken,
    ) -> Result<SwapOutcome, AttemptError> {
        let (planned, swap) = self
            .broadcast_swap(payout, to_address, publisher, cancel)
            .await
            .map_err(|error| AttemptError { error, swap: None })?;

        // --- Poll --- //
        publisher.publish(SwapStatus::Polling {
            message: POLLING_MESSAGE.to_string(),
            tx_hash: swap.tx_hash,
            explorer_url: swap.explorer_url.clone(),
        });
        let params = StatusParams {
            transaction_id: swap.tx_hash,
            request_id: planned.request_id().to_string(),
            from_chain_id: payout.from_chain,
            to_chain_id: payout.to_chain,
        };

        match poll_status(self.router.as_ref(), &params, &self.poller_config, cancel).await {
            Ok(status) => Ok(SwapOutcome { swap, status }),
            Err(e) => Err(AttemptError { error: e.into(), swap: Some(swap) }),
        }
    }

    /// Request a route, then approve and submit the swap
    async fn broadcast_swap(
        &self,
        payout: &Payout,
        to_address: Option<Address>,
        publisher: &StatusPublisher,
        cancel: &CancellationToken,
    ) -> Result<(PlannedRoute, SwapReference), SwapError> {
        // Fail before touching the router if there is no account to swap from
        if self.wallet.address().is_none() {
            return Err(WalletError::NotConnected.into());
        }

        // --- Quote --- //
        let planned = with_cancel(cancel, async {
            self.planner
                .plan_route(self.router.as_ref(), payout, to_address)
                .await
                .map_err(SwapError::from)
        })
        .await?;
        let route = &planned.quote.response.route;
        let tx_request = &route.transaction_request;

        // --- Approve --- //
        publisher.publish(SwapStatus::Approving { message: APPROVING_MESSAGE.to_string() });
        let approval = WalletTransaction {
            to: payout.from_token_address,
            data: encode_approve(tx_request.target, planned.from_amount()),
            value: U256::ZERO,
            chain_id: payout.from_chain,
        };
        let approval_hash = self.submit(approval, cancel).await?;
        info!("approval submitted: {approval_hash:#x}");

        // --- Swap --- //
        publisher.publish(SwapStatus::Swapping { message: SWAPPING_MESSAGE.to_string() });
        let swap = WalletTransaction {
            to: tx_request.target,
            data: tx_request.data.clone(),
            value: tx_request.value,
            chain_id: payout.from_chain,
        };
        let tx_hash = self.submit(swap, cancel).await?;
        let explorer_url = explorer_url(tx_hash, route);
        info!("swap submitted: {tx_hash:#x}, explorer: {explorer_url}");

        Ok((planned, SwapReference { tx_hash, explorer_url }))
    }

    /// Submit a transaction through the wallet
    async fn submit(
        &self,
        tx: WalletTransaction,
        cancel: &CancellationToken,
    ) -> Result<TxHash, SwapError> {
        with_cancel(cancel, async {
            self.wallet.send_transaction(tx).await.map_err(SwapError::from)
        })
        .await
    }
}

/// Run a step of the attempt, abandoning it if the token is cancelled
async fn with_cancel<T, F>(cancel: &CancellationToken, step: F) -> Result<T, SwapError>
where
    F: Future<Output = Result<T, SwapError>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(SwapError::Cancelled),
        res = step => res,
    }
}
