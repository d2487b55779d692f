//! A client for the cross-chain router's route and status endpoints

pub mod error;
pub mod poller;

use std::time::Duration;

use async_trait::async_trait;
use payout_settlement_api::{
    RouteParams, RouteResponse, StatusParams, StatusResponse, INTEGRATOR_ID_HEADER,
    REQUEST_ID_HEADER, ROUTE_ENDPOINT, STATUS_ENDPOINT,
};
use reqwest::{Client, Response, StatusCode};
use tracing::{info, instrument};

use self::error::RouterError;

// -------------
// | Constants |
// -------------

/// The default router API base URL
pub const DEFAULT_ROUTER_BASE_URL: &str = "https://v2.api.squidrouter.com/v2";
/// The default timeout on route requests
const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(30);

// ---------
// | Types |
// ---------

/// A route along with the correlation id the router assigned to it
#[derive(Debug, Clone)]
pub struct RouteQuote {
    /// The route response
    pub response: RouteResponse,
    /// The router's request id, required to query the status of the swap
    pub request_id: String,
}

/// The router operations the settler depends on
#[async_trait]
pub trait RouterApi: Send + Sync {
    /// Request an executable route
    async fn get_route(&self, params: &RouteParams) -> Result<RouteQuote, RouterError>;

    /// Query the status of a submitted swap.
    ///
    /// Returns `RouterError::NotFound` if the router has not indexed the swap
    /// transaction yet
    async fn get_status(&self, params: &StatusParams) -> Result<StatusResponse, RouterError>;
}

/// Configuration options for the router client
#[derive(Debug, Clone)]
pub struct RouterClientConfig {
    /// The router API base URL
    pub base_url: String,
    /// The integrator id sent with every request
    pub integrator_id: String,
    /// The timeout on route requests. Status requests are not bounded here;
    /// the poller owns their pacing
    pub route_timeout: Duration,
}

impl RouterClientConfig {
    /// Create a config for the default router with the given integrator id
    pub fn new(integrator_id: String) -> Self {
        Self {
            base_url: DEFAULT_ROUTER_BASE_URL.to_string(),
            integrator_id,
            route_timeout: DEFAULT_ROUTE_TIMEOUT,
        }
    }
}

// ----------
// | Client |
// ----------

/// HTTP client for the cross-chain router
#[derive(Debug, Clone)]
pub struct RouterClient {
    /// Configuration settings
    config: RouterClientConfig,
    /// The underlying HTTP client
    http_client: Client,
}

impl RouterClient {
    /// Create a new router client
    pub fn new(config: RouterClientConfig) -> Result<Self, RouterError> {
        let http_client = Client::builder().build().map_err(RouterError::setup)?;
        Ok(Self { config, http_client })
    }

    /// Build the URL of a router endpoint
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RouterApi for RouterClient {
    #[instrument(skip_all, fields(from_chain = params.from_chain, to_chain = params.to_chain))]
    async fn get_route(&self, params: &RouteParams) -> Result<RouteQuote, RouterError> {
        info!(
            "requesting route for {} of {} (post-hook: {})",
            params.from_amount,
            params.from_token,
            params.post_hook.is_some()
        );

        let response = self
            .http_client
            .post(self.endpoint_url(ROUTE_ENDPOINT))
            .header(INTEGRATOR_ID_HEADER, self.config.integrator_id.as_str())
            .timeout(self.config.route_timeout)
            .json(params)
            .send()
            .await?;
        let response = check_response(response).await?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(RouterError::MissingRequestId)?;
        let response = response.json::<RouteResponse>().await.map_err(RouterError::parse)?;

        info!(%request_id, "received route via {}", response.route.transaction_request.target);
        Ok(RouteQuote { response, request_id })
    }

    #[instrument(skip_all, fields(tx_hash = %params.transaction_id, request_id = %params.request_id))]
    async fn get_status(&self, params: &StatusParams) -> Result<StatusResponse, RouterError> {
        let response = self
            .http_client
            .get(self.endpoint_url(STATUS_ENDPOINT))
            .header(INTEGRATOR_ID_HEADER, self.config.integrator_id.as_str())
            .query(params)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RouterError::NotFound);
        }

        let response = check_response(response).await?;
        response.json::<StatusResponse>().await.map_err(RouterError::parse)
    }
}

/// Convert a non-success response into an upstream error carrying its body
async fn check_response(response: Response) -> Result<Response, RouterError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(RouterError::parse)?;
    Err(RouterError::upstream(status, body))
}
