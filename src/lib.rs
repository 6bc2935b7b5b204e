//! Jupiter-routed token swap workflow for Solana wallets.
//!
//! The crate drives the two halves of a swap surface:
//!
//! - [`QuoteController`]: debounced quote fetching over a fixed asset
//!   catalog, with price-impact validation and a staleness guard so
//!   out-of-order responses never overwrite newer state.
//! - [`SwapSubmitter`]: commission fee-account derivation, server-built
//!   transaction fetch, wallet signing, broadcast and confirmation polling.
//!
//! Routing, slippage math and transaction construction are delegated to the
//! Jupiter v6 API; signing goes through the [`WalletAdapter`] seam.

pub mod common;
pub mod constants;
pub mod swap;
pub mod utils;

use std::sync::Arc;

use solana_sdk::signature::Signature;

pub use crate::common::jupiter_api::{
    JupiterApiClient, JupiterApiConfig, QuoteRequest, QuoteResponse, RouteApi, SwapRequest,
    SwapResponse,
};
pub use crate::common::types::{CommissionConfig, SolanaRpcClient, SwapConfig};
pub use crate::constants::tokens::{ASSETS, Asset};
pub use crate::swap::{
    KeypairWallet, QuoteController, QuoteSnapshot, SwapError, SwapSubmitter, WalletAdapter,
};

/// Entry point wiring the RPC client, the routing API client, the quote
/// controller and the submitter from one [`SwapConfig`].
pub struct SwapClient {
    pub rpc: Arc<SolanaRpcClient>,
    pub config: SwapConfig,
    controller: QuoteController,
    submitter: SwapSubmitter,
}

impl SwapClient {
    pub fn new(config: SwapConfig) -> anyhow::Result<Self> {
        let rpc = Arc::new(SolanaRpcClient::new_with_commitment(
            config.rpc_url.clone(),
            config.commitment,
        ));
        let api: Arc<dyn RouteApi> = Arc::new(JupiterApiClient::new(config.api.clone())?);

        let controller = QuoteController::new(api.clone(), config.commission.clone());
        let submitter =
            SwapSubmitter::new(rpc.clone(), api, config.commission.clone(), config.commitment);

        Ok(Self { rpc, config, controller, submitter })
    }

    /// The quote controller driving input, debounce and display state.
    pub fn controller(&self) -> &QuoteController {
        &self.controller
    }

    /// The transaction submitter.
    pub fn submitter(&self) -> &SwapSubmitter {
        &self.submitter
    }

    /// Submit the currently held quote with the given wallet.
    pub async fn swap_with_wallet(
        &self,
        wallet: &dyn WalletAdapter,
    ) -> Result<Signature, SwapError> {
        let snapshot = self.controller.snapshot();
        self.submitter.swap(wallet, &snapshot).await
    }
}
