//! Error types for the router client

use reqwest::StatusCode;

/// An error returned by the cross-chain router client
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// The request did not reach the router or timed out
    #[error("network error: {0}")]
    Network(String),
    /// The router returned a non-success status
    #[error("router returned {status}: {body}")]
    Upstream {
        /// The HTTP status code
        status: u16,
        /// The response body
        body: String,
    },
    /// The router has not indexed the requested transaction
    #[error("transaction not found")]
    NotFound,
    /// The route response carried no correlation id
    #[error("route response is missing the request id header")]
    MissingRequestId,
    /// An error parsing a router response
    #[error("parse error: {0}")]
    Parse(String),
    /// An error setting up the client
    #[error("setup error: {0}")]
    Setup(String),
}

#[allow(clippy::needless_pass_by_value)]
impl RouterError {
    /// Create a new network error
    pub fn network<T: ToString>(e: T) -> Self {
        RouterError::Network(e.to_string())
    }

    /// Create a new upstream error
    pub fn upstream<T: ToString>(status: StatusCode, body: T) -> Self {
        RouterError::Upstream { status: status.as_u16(), body: body.to_string() }
    }

    /// Create a new parse error
    pub fn parse<T: ToString>(e: T) -> Self {
        RouterError::Parse(e.to_string())
    }

    /// Create a new setup error
    pub fn setup<T: ToString>(e: T) -> Self {
        RouterError::Setup(e.to_string())
    }
}

impl From<reqwest::Error> for RouterError {
    fn from(e: reqwest::Error) -> Self {
        RouterError::network(e)
    }
}
