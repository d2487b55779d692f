//! Settles payouts across chains: requests a route from the cross-chain
//! router, approves and submits the swap through the commerce's wallet,
//! escrows the proceeds in a payout vault, and tracks the transfer to
//! completion
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]

pub mod cli;
pub mod error;
pub mod helpers;
pub mod networks;
pub mod orchestrator;
pub mod route_planner;
pub mod router_client;
pub mod telemetry;
pub mod vault;
pub mod wallet;

#[cfg(test)]
pub(crate) mod mocks;
