//! The status of a settlement attempt, as published to observers

use alloy_primitives::TxHash;
use payout_settlement_api::RouterTransactionStatus;
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::info;

/// The capacity of the ordered status update stream
const STATUS_STREAM_CAPACITY: usize = 32;

/// The broad class of a failed attempt, used to pick a remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapErrorKind {
    /// The payout cannot be settled as given
    InvalidPayout,
    /// No route could be obtained
    Routing,
    /// The wallet is disconnected or refused to submit
    Wallet,
    /// The router never indexed the swap
    NotFoundExhausted,
    /// Querying the swap's status failed
    Polling,
    /// The attempt was abandoned by the caller
    Cancelled,
}

/// The state of a settlement attempt.
///
/// Attempts move strictly forward through
/// `Idle -> Approving -> Swapping -> Polling -> Success`, and any failure
/// moves directly to `Error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwapStatus {
    /// No attempt is in flight, or a route is being requested
    Idle {
        /// A human-readable progress message
        message: String,
    },
    /// The source token is being approved for the router
    Approving {
        /// A human-readable progress message
        message: String,
    },
    /// The swap transaction is being submitted
    Swapping {
        /// A human-readable progress message
        message: String,
    },
    /// The swap was broadcast and the cross-chain transfer is in flight
    Polling {
        /// A human-readable progress message
        message: String,
        /// The swap transaction
        tx_hash: TxHash,
        /// An explorer link for the swap
        explorer_url: String,
    },
    /// The transfer reached a terminal status on the router
    Success {
        /// A human-readable result message
        message: String,
        /// The swap transaction
        tx_hash: TxHash,
        /// An explorer link for the swap
        explorer_url: String,
        /// The router's terminal status
        final_status: RouterTransactionStatus,
    },
    /// The attempt failed
    Error {
        /// The failure message
        message: String,
        /// The class of failure
        kind: SwapErrorKind,
        /// The swap transaction, if it was broadcast before the failure
        tx_hash: Option<TxHash>,
        /// An explorer link for the swap, if it was broadcast
        explorer_url: Option<String>,
    },
}

impl Default for SwapStatus {
    fn default() -> Self {
        SwapStatus::Idle { message: String::new() }
    }
}

impl SwapStatus {
    /// The status message
    pub fn message(&self) -> &str {
        match self {
            SwapStatus::Idle { message }
            | SwapStatus::Approving { message }
            | SwapStatus::Swapping { message }
            | SwapStatus::Polling { message, .. }
            | SwapStatus::Success { message, .. }
            | SwapStatus::Error { message, .. } => message,
        }
    }

    /// The name of the state
    pub fn state_name(&self) -> &'static str {
        match self {
            SwapStatus::Idle { .. } => "idle",
            SwapStatus::Approving { .. } => "approving",
            SwapStatus::Swapping { .. } => "swapping",
            SwapStatus::Polling { .. } => "polling",
            SwapStatus::Success { .. } => "success",
            SwapStatus::Error { .. } => "error",
        }
    }

    /// Whether the attempt has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Success { .. } | SwapStatus::Error { .. })
    }

    /// The swap transaction and its explorer link, once broadcast
    pub fn swap_reference(&self) -> Option<(TxHash, &str)> {
        match self {
            SwapStatus::Polling { tx_hash, explorer_url, .. }
            | SwapStatus::Success { tx_hash, explorer_url, .. } => {
                Some((*tx_hash, explorer_url.as_str()))
            },
            SwapStatus::Error { tx_hash: Some(tx_hash), explorer_url, .. } => {
                Some((*tx_hash, explorer_url.as_deref().unwrap_or_default()))
            },
            _ => None,
        }
    }
}

// -------------
// | Publisher |
// -------------

/// Publishes status transitions, both as a current value and as an ordered
/// stream of updates
#[derive(Debug)]
pub struct StatusPublisher {
    /// The latest status
    current: watch::Sender<SwapStatus>,
    /// Every status, in publication order
    updates: broadcast::Sender<SwapStatus>,
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPublisher {
    /// Create a publisher in the idle state
    pub fn new() -> Self {
        let (current, _) = watch::channel(SwapStatus::default());
        let (updates, _) = broadcast::channel(STATUS_STREAM_CAPACITY);
        Self { current, updates }
    }

    /// Publish a new status
    pub fn publish(&self, status: SwapStatus) {
        info!(state = status.state_name(), "{}", status.message());
        self.current.send_replace(status.clone());
        // Having no stream subscribers is fine
        let _ = self.updates.send(status);
    }

    /// The latest status
    pub fn current(&self) -> SwapStatus {
        self.current.borrow().clone()
    }

    /// Watch the latest status
    pub fn watch(&self) -> watch::Receiver<SwapStatus> {
        self.current.subscribe()
    }

    /// Subscribe to the ordered stream of updates published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SwapStatus> {
        self.updates.subscribe()
    }
}
