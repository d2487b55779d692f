//! Settles a single payout from the command line
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]

use std::{error::Error, sync::Arc};

use clap::Parser;
use payout_settler::{
    cli::Cli,
    orchestrator::{
        status::{StatusPublisher, SwapStatus},
        SwapOrchestrator,
    },
    route_planner::RoutePlanner,
    router_client::RouterClient,
    telemetry::setup_logging,
    wallet::local::LocalWallet,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    setup_logging(cli.json_logs);

    let payout = cli.read_payout().await?;
    let networks = cli.networks().await?;
    let wallet = LocalWallet::new(cli.signer()?, &networks)?;
    let router = RouterClient::new(cli.router_config())?;
    let planner = RoutePlanner::new(cli.vault_registry().await?);
    let orchestrator =
        SwapOrchestrator::new(Arc::new(router), Arc::new(wallet), planner, cli.poller_config());

    // Abandon the attempt on ctrl-c
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling settlement");
                cancel.cancel();
            }
        }
    });

    info!("settling payout {} ({} {})", payout.id, payout.from_amount, payout.from_token_symbol);
    let publisher = StatusPublisher::new();
    let status = orchestrator
        .execute_swap_with_cancel(&payout, cli.destination_address, &publisher, &cancel)
        .await;
    println!("{}", serde_json::to_string_pretty(&status)?);

    match status {
        SwapStatus::Error { message, .. } => Err(message.into()),
        _ => Ok(()),
    }
}
