//! Polls the router until a submitted swap settles.
//!
//! The router may take a few seconds to index a swap after it is broadcast,
//! so "not found" responses are retried a bounded number of times. Once the
//! router knows the swap, in-flight statuses are polled without bound, since a
//! cross-chain transfer can legitimately take minutes

use std::time::Duration;

use payout_settlement_api::{RouterTransactionStatus, StatusParams, StatusResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::{error::RouterError, RouterApi};

// -------------
// | Constants |
// -------------

/// The default interval between status queries
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// The default number of "not found" responses tolerated before giving up
const DEFAULT_MAX_NOT_FOUND_RETRIES: u32 = 10;

// ---------
// | Types |
// ---------

/// Configuration for the status poller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// The interval between status queries
    pub interval: Duration,
    /// The number of "not found" responses after which polling fails
    pub max_not_found_retries: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_not_found_retries: DEFAULT_MAX_NOT_FOUND_RETRIES,
        }
    }
}

/// An error polling a swap's status
#[derive(Debug, Clone, thiserror::Error)]
pub enum PollError {
    /// The router never indexed the swap
    #[error("transaction not found after {attempts} retries")]
    NotFoundExhausted {
        /// The number of "not found" responses received
        attempts: u32,
    },
    /// A status request failed
    #[error("status request failed: {0}")]
    Router(RouterError),
    /// Polling was cancelled
    #[error("polling cancelled")]
    Cancelled,
}

// ----------
// | Poller |
// ----------

/// Poll the router until the swap reaches a terminal status.
///
/// Both an HTTP 404 and a `not_found` status in the response body count
/// towards the retry bound. Any other request error ends polling immediately
#[instrument(skip_all, fields(tx_hash = %params.transaction_id, request_id = %params.request_id))]
pub async fn poll_status(
    router: &dyn RouterApi,
    params: &StatusParams,
    config: &PollerConfig,
    cancel: &CancellationToken,
) -> Result<StatusResponse, PollError> {
    let mut not_found = 0u32;
    loop {
        let res = tokio::select! {
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            res = router.get_status(params) => res,
        };

        match res {
            Ok(status) if status.squid_transaction_status.is_terminal() => {
                info!("swap reached terminal status: {}", status.squid_transaction_status);
                return Ok(status);
            },
            Ok(status) if status.squid_transaction_status == RouterTransactionStatus::NotFound => {
                not_found += 1;
            },
            Ok(status) => {
                debug!("swap in flight: {}", status.squid_transaction_status);
            },
            Err(RouterError::NotFound) => {
                not_found += 1;
            },
            Err(e) => return Err(PollError::Router(e)),
        }

        if not_found >= config.max_not_found_retries {
            warn!("swap not indexed after {not_found} retries, giving up");
            return Err(PollError::NotFoundExhausted { attempts: not_found });
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            _ = tokio::time::sleep(config.interval) => {},
        }
    }
}
