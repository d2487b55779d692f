//! The API types for payout settlement: payout records as served by the
//! backend, and the request/response shapes of the cross-chain router
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]

pub mod serialization;
pub mod types;

pub use types::*;

// -------------
// | Constants |
// -------------

/// The router route used to request an executable swap route
pub const ROUTE_ENDPOINT: &str = "route";
/// The router route used to query the status of a submitted swap
pub const STATUS_ENDPOINT: &str = "status";
/// The header carrying the integrator identifier on router requests
pub const INTEGRATOR_ID_HEADER: &str = "x-integrator-id";
/// The response header carrying the router's request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";
