//! API types for payout settlement

pub mod hook;
pub mod payout;
pub mod route;
pub mod status;

pub use hook::*;
pub use payout::*;
pub use route::*;
pub use status::*;
