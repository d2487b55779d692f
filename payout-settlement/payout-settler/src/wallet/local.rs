//! A wallet backed by a local private key

use std::collections::HashMap;

use alloy::{
    network::TransactionBuilder,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use tracing::{info, instrument};

use super::{TransactionSubmitter, WalletError, WalletTransaction};
use crate::networks::NetworkRegistry;

/// A wallet that signs with a local key and broadcasts over each network's
/// RPC endpoint.
///
/// A wallet created without a key is disconnected; every submission fails
#[derive(Clone)]
pub struct LocalWallet {
    /// The signing key, if connected
    signer: Option<PrivateKeySigner>,
    /// A signing provider per chain id
    providers: HashMap<u64, DynProvider>,
}

impl LocalWallet {
    /// Create a wallet for the given key and networks
    pub fn new(
        signer: Option<PrivateKeySigner>,
        networks: &NetworkRegistry,
    ) -> Result<Self, WalletError> {
        let mut providers = HashMap::new();
        if let Some(signer) = &signer {
            for network in networks.iter() {
                let url: Url = network.rpc_url.parse().map_err(WalletError::setup)?;
                let provider = ProviderBuilder::new().wallet(signer.clone()).connect_http(url);
                providers.insert(network.chain_id, DynProvider::new(provider));
            }
        }

        Ok(Self { signer, providers })
    }

    /// A wallet with no connected account
    pub fn disconnected() -> Self {
        Self { signer: None, providers: HashMap::new() }
    }
}

#[async_trait]
impl TransactionSubmitter for LocalWallet {
    fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    #[instrument(skip_all, fields(to = %tx.to, chain_id = tx.chain_id))]
    async fn send_transaction(&self, tx: WalletTransaction) -> Result<TxHash, WalletError> {
        let from = self.address().ok_or(WalletError::NotConnected)?;
        let provider =
            self.providers.get(&tx.chain_id).ok_or(WalletError::UnsupportedChain(tx.chain_id))?;

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(tx.to)
            .with_input(tx.data)
            .with_value(tx.value)
            .with_chain_id(tx.chain_id);

        let pending = provider.send_transaction(request).await.map_err(WalletError::broadcast)?;
        let tx_hash = *pending.tx_hash();
        info!("broadcast transaction {tx_hash:#x}");

        Ok(tx_hash)
    }
}
