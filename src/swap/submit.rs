//! Transaction submitter: turns a held quote into a confirmed swap.
//!
//! Sequence: precondition checks, fee-account derivation, swap-transaction
//! build, wallet signature, broadcast (preflight skipped, bounded retries),
//! then confirmation polling against the blockhash validity window at
//! "confirmed" commitment. Every step failure maps to its own
//! [`SwapError`] variant so the caller can surface it and stay retryable.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use spl_associated_token_account::get_associated_token_address;
use tracing::{debug, error, info};

use crate::common::jupiter_api::{RouteApi, SwapRequest};
use crate::common::types::{CommissionConfig, SolanaRpcClient};
use crate::constants::{BROADCAST_MAX_RETRIES, CONFIRM_POLL_INTERVAL};
use crate::swap::error::SwapError;
use crate::swap::quote::QuoteSnapshot;
use crate::swap::wallet::WalletAdapter;

pub struct SwapSubmitter {
    rpc: Arc<SolanaRpcClient>,
    api: Arc<dyn RouteApi>,
    commission: CommissionConfig,
    commitment: CommitmentConfig,
}

impl SwapSubmitter {
    pub fn new(
        rpc: Arc<SolanaRpcClient>,
        api: Arc<dyn RouteApi>,
        commission: CommissionConfig,
        commitment: CommitmentConfig,
    ) -> Self {
        Self { rpc, api, commission, commitment }
    }

    /// Token account that collects the commission for the given output mint.
    ///
    /// Pure associated-account derivation, recomputed for the current
    /// destination on every submission; a cached address for a different
    /// mint would silently misroute the fee.
    pub fn derive_fee_account(&self, output_mint: &Pubkey) -> Pubkey {
        get_associated_token_address(&self.commission.commission_wallet, output_mint)
    }

    /// All preconditions must hold or submission refuses before any network
    /// call is made.
    pub fn check_preconditions(
        &self,
        wallet: &dyn WalletAdapter,
        snapshot: &QuoteSnapshot,
    ) -> Result<(), SwapError> {
        if !wallet.is_connected() || wallet.pubkey().is_none() {
            return Err(SwapError::WalletNotReady);
        }
        if snapshot.from_asset.mint == snapshot.to_asset.mint {
            return Err(SwapError::SameAsset);
        }
        if let Some(message) = &snapshot.error {
            return Err(SwapError::ErrorPending(message.clone()));
        }
        // The controller drops the quote whenever any input changes, so a
        // held quote is always priced for the snapshot's exact inputs.
        if snapshot.quote.is_none() {
            return Err(SwapError::MissingQuote);
        }
        if snapshot.to_amount == 0.0 {
            return Err(SwapError::ZeroOutput);
        }
        Ok(())
    }

    /// Steps 1-4: derive the fee account, fetch the prebuilt transaction,
    /// decode it and have the wallet sign it.
    pub async fn prepare_signed_transaction(
        &self,
        wallet: &dyn WalletAdapter,
        snapshot: &QuoteSnapshot,
    ) -> Result<VersionedTransaction, SwapError> {
        self.check_preconditions(wallet, snapshot)?;

        let user = wallet.pubkey().ok_or(SwapError::WalletNotReady)?;
        let quote = snapshot.quote.clone().ok_or(SwapError::MissingQuote)?;

        let fee_account = self.derive_fee_account(&snapshot.to_asset.mint);
        debug!(%fee_account, commission_wallet = %self.commission.commission_wallet, "derived commission fee account");

        let request = SwapRequest::new(quote, &user, &fee_account);
        let response = self.api.build_swap_transaction(&request).await?;

        let raw = STANDARD
            .decode(&response.swap_transaction)
            .map_err(|e| SwapError::TransactionDecode(e.to_string()))?;
        let unsigned: VersionedTransaction =
            bincode::deserialize(&raw).map_err(|e| SwapError::TransactionDecode(e.to_string()))?;

        wallet.sign_transaction(unsigned).await
    }

    /// Steps 5-6: broadcast the signed transaction (skipping preflight, with
    /// the network's own bounded retries) and poll for confirmation until it
    /// lands or the blockhash window closes.
    pub async fn broadcast_and_confirm(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Signature, SwapError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: true,
            max_retries: Some(BROADCAST_MAX_RETRIES),
            ..RpcSendTransactionConfig::default()
        };

        let signature = self
            .rpc
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(|e| SwapError::Broadcast(e.to_string()))?;
        debug!(%signature, "transaction broadcast");

        let (_, last_valid_block_height) = self
            .rpc
            .get_latest_blockhash_with_commitment(self.commitment)
            .await
            .map_err(|e| SwapError::Confirmation(e.to_string()))?;

        loop {
            let status = self
                .rpc
                .get_signature_status_with_commitment(&signature, self.commitment)
                .await
                .map_err(|e| SwapError::Confirmation(e.to_string()))?;

            match status {
                Some(Ok(())) => {
                    info!(%signature, "transaction confirmed: {}", Self::explorer_url(&signature));
                    return Ok(signature);
                }
                Some(Err(tx_err)) => {
                    return Err(SwapError::Confirmation(tx_err.to_string()));
                }
                None => {}
            }

            let block_height = self
                .rpc
                .get_block_height_with_commitment(self.commitment)
                .await
                .map_err(|e| SwapError::Confirmation(e.to_string()))?;
            if block_height > last_valid_block_height {
                return Err(SwapError::BlockhashExpired);
            }

            tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
        }
    }

    /// Full submission sequence. Failures are logged here and returned as
    /// distinct variants; nothing panics and the caller may retry.
    pub async fn swap(
        &self,
        wallet: &dyn WalletAdapter,
        snapshot: &QuoteSnapshot,
    ) -> Result<Signature, SwapError> {
        let signed = self.prepare_signed_transaction(wallet, snapshot).await.inspect_err(|e| {
            error!("swap preparation failed: {e}");
        })?;

        self.broadcast_and_confirm(&signed).await.inspect_err(|e| {
            error!("swap submission failed: {e}");
        })
    }

    /// Solscan link for a submitted signature.
    pub fn explorer_url(signature: &Signature) -> String {
        format!("https://solscan.io/tx/{signature}")
    }
}
