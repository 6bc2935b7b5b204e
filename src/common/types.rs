use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

use crate::common::jupiter_api::JupiterApiConfig;
use crate::constants;

pub type SolanaRpcClient = solana_client::nonblocking::rpc_client::RpcClient;

/// Commission and slippage settings applied to every quote and submission.
///
/// These are configuration values, not logic: the rate goes on the quote
/// request as a fee parameter and drives the fee display; the recipient
/// anchors the fee-account derivation.
#[derive(Debug, Clone)]
pub struct CommissionConfig {
    pub commission_bps: u16,
    pub commission_wallet: Pubkey,
    pub slippage_bps: u16,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            commission_bps: constants::DEFAULT_COMMISSION_BPS,
            commission_wallet: *constants::COMMISSION_WALLET,
            slippage_bps: constants::DEFAULT_SLIPPAGE_BPS,
        }
    }
}

impl CommissionConfig {
    /// Commission taken from a given input amount, in display units.
    /// Drives the "Fee (4%)" figure shown next to the input field.
    pub fn commission_amount(&self, input_amount: f64) -> f64 {
        input_amount * self.commission_bps as f64 / 10_000.0
    }
}

/// Top-level configuration for [`crate::SwapClient`].
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub api: JupiterApiConfig,
    pub commission: CommissionConfig,
}

impl SwapConfig {
    /// Mainnet defaults around a caller-supplied RPC endpoint. Use a private
    /// RPC here; public endpoints rate-limit confirmation polling.
    pub fn mainnet(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            commitment: CommitmentConfig::confirmed(),
            api: JupiterApiConfig::default(),
            commission: CommissionConfig::default(),
        }
    }
}
