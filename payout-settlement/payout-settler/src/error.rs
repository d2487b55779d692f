//! Error types for a settlement attempt

use crate::{
    orchestrator::status::SwapErrorKind,
    route_planner::PlanError,
    router_client::{error::RouterError, poller::PollError},
    wallet::WalletError,
};

/// An error that ends a settlement attempt
#[derive(Debug, Clone, thiserror::Error)]
pub enum SwapError {
    /// The payout cannot be settled as given
    #[error("invalid payout: {0}")]
    InvalidPayout(String),
    /// The route request failed
    #[error("routing failed: {0}")]
    Routing(RouterError),
    /// The wallet failed to submit a transaction
    #[error("{0}")]
    Wallet(WalletError),
    /// The router never indexed the swap
    #[error("transaction not found after {attempts} retries")]
    NotFoundExhausted {
        /// The number of "not found" responses received
        attempts: u32,
    },
    /// A status query failed
    #[error("status polling failed: {0}")]
    Polling(RouterError),
    /// The caller abandoned the attempt
    #[error("settlement cancelled")]
    Cancelled,
}

impl SwapError {
    /// The class of the error
    pub fn kind(&self) -> SwapErrorKind {
        match self {
            SwapError::InvalidPayout(_) => SwapErrorKind::InvalidPayout,
            SwapError::Routing(_) => SwapErrorKind::Routing,
            SwapError::Wallet(_) => SwapErrorKind::Wallet,
            SwapError::NotFoundExhausted { .. } => SwapErrorKind::NotFoundExhausted,
            SwapError::Polling(_) => SwapErrorKind::Polling,
            SwapError::Cancelled => SwapErrorKind::Cancelled,
        }
    }
}

impl From<PlanError> for SwapError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidPayout(msg) => SwapError::InvalidPayout(msg),
            PlanError::Router(e) => SwapError::Routing(e),
        }
    }
}

impl From<WalletError> for SwapError {
    fn from(e: WalletError) -> Self {
        SwapError::Wallet(e)
    }
}

impl From<PollError> for SwapError {
    fn from(e: PollError) -> Self {
        match e {
            PollError::NotFoundExhausted { attempts } => SwapError::NotFoundExhausted { attempts },
            PollError::Router(e) => SwapError::Polling(e),
            PollError::Cancelled => SwapError::Cancelled,
        }
    }
}
