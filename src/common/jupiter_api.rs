//! Jupiter v6 HTTP API client (quote + swap-transaction build).
//!
//! This client only assembles REST calls; routing, slippage math and
//! transaction construction all happen server-side. The quote payload is
//! opaque to us beyond the fields we validate, and is echoed back verbatim
//! on the build call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::swap::error::SwapError;

/// Jupiter API client configuration.
#[derive(Debug, Clone)]
pub struct JupiterApiConfig {
    /// Base host, e.g. `https://quote-api.jup.ag`
    pub base_host: String,
    /// Request timeout in milliseconds.
    pub timeout_millis: u64,
}

impl Default for JupiterApiConfig {
    fn default() -> Self {
        Self { base_host: "https://quote-api.jup.ag".to_string(), timeout_millis: 10_000 }
    }
}

/// Parameters for `GET /v6/quote`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    /// Input amount in base units of the input mint.
    pub amount: u64,
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u16,
    #[serde(rename = "feeBps")]
    pub fee_bps: u16,
}

/// Response of `GET /v6/quote`.
///
/// Only the fields this component validates are typed; everything else
/// (route plan, thresholds, context slot, ...) is kept in `extra` so the
/// payload round-trips verbatim into the swap-build request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Output amount in base units of the output mint, as a decimal string.
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    /// Price impact as a decimal fraction string (e.g. `"0.0001468"`).
    #[serde(rename = "priceImpactPct", default)]
    pub price_impact_pct: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl QuoteResponse {
    /// Output amount parsed to base units.
    pub fn out_amount_base_units(&self) -> Result<u64, SwapError> {
        self.out_amount.parse::<u64>().map_err(|_| SwapError::MalformedQuote)
    }

    /// Price impact converted from a fraction to a percentage. A missing or
    /// unparsable field counts as zero impact.
    pub fn price_impact_percent(&self) -> f64 {
        self.price_impact_pct.parse::<f64>().unwrap_or(0.0) * 100.0
    }
}

/// Body of `POST /v6/swap`.
#[derive(Debug, Clone, Serialize)]
pub struct SwapRequest {
    /// The quote payload, echoed back exactly as received.
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteResponse,
    #[serde(rename = "userPublicKey")]
    pub user_public_key: String,
    /// Auto-wrap/unwrap native SOL when it participates in the trade.
    #[serde(rename = "wrapAndUnwrapSol")]
    pub wrap_and_unwrap_sol: bool,
    /// Token account collecting the platform fee for the output mint.
    #[serde(rename = "feeAccount")]
    pub fee_account: String,
}

impl SwapRequest {
    pub fn new(quote_response: QuoteResponse, user_public_key: &Pubkey, fee_account: &Pubkey) -> Self {
        Self {
            quote_response,
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: true,
            fee_account: fee_account.to_string(),
        }
    }
}

/// Response of `POST /v6/swap`.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapResponse {
    /// Base64-encoded serialized unsigned transaction.
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
}

/// Seam over the routing API so tests can script responses.
#[async_trait]
pub trait RouteApi: Send + Sync {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, SwapError>;

    async fn build_swap_transaction(
        &self,
        request: &SwapRequest,
    ) -> Result<SwapResponse, SwapError>;
}

/// HTTP client for the hosted Jupiter v6 API.
#[derive(Clone)]
pub struct JupiterApiClient {
    http: Client,
    pub config: JupiterApiConfig,
}

impl JupiterApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: JupiterApiConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(config.timeout_millis);
        let http = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_nodelay(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { http, config })
    }

    /// Create a client with the default host and a 10s timeout.
    pub fn mainnet_default() -> anyhow::Result<Self> {
        Self::new(JupiterApiConfig::default())
    }

    #[inline]
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_host.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RouteApi for JupiterApiClient {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, SwapError> {
        let url = self.endpoint("/v6/quote");
        debug!(
            input_mint = %request.input_mint,
            output_mint = %request.output_mint,
            amount = request.amount,
            "requesting quote"
        );

        let resp = self
            .http
            .get(url)
            .query(request)
            .send()
            .await
            .map_err(|e| SwapError::QuoteFetch(e.to_string()))?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SwapError::QuoteFetch(body));
        }

        resp.json::<QuoteResponse>().await.map_err(|_| SwapError::MalformedQuote)
    }

    async fn build_swap_transaction(
        &self,
        request: &SwapRequest,
    ) -> Result<SwapResponse, SwapError> {
        let url = self.endpoint("/v6/swap");
        debug!(user = %request.user_public_key, fee_account = %request.fee_account, "building swap transaction");

        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| SwapError::SwapBuild(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SwapError::SwapBuild(format!("HTTP {status}: {body}")));
        }

        resp.json::<SwapResponse>().await.map_err(|e| SwapError::SwapBuild(e.to_string()))
    }
}
