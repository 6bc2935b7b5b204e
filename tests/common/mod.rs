//! Shared test helpers: a scriptable routing API and fixtures.

// not every test binary uses every helper
#![allow(dead_code)]

pub mod http_stub;

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parking_lot::Mutex;
use serde_json::json;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tokio::sync::oneshot;

use sol_swap_sdk::{
    CommissionConfig, QuoteRequest, QuoteResponse, RouteApi, SwapError, SwapRequest, SwapResponse,
    WalletAdapter,
};

struct ScriptedQuote {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<QuoteResponse, SwapError>,
}

/// Routing API double with scripted responses, optional per-call gating (to
/// control settle order) and call counting.
#[derive(Default)]
pub struct ScriptedRouteApi {
    quote_calls: AtomicUsize,
    swap_calls: AtomicUsize,
    quote_script: Mutex<VecDeque<ScriptedQuote>>,
    swap_script: Mutex<VecDeque<Result<SwapResponse, SwapError>>>,
    last_quote_request: Mutex<Option<QuoteRequest>>,
    last_swap_request: Mutex<Option<SwapRequest>>,
}

impl ScriptedRouteApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_quote(&self, result: Result<QuoteResponse, SwapError>) {
        self.quote_script.lock().push_back(ScriptedQuote { gate: None, result });
    }

    /// Push a quote response that is only released once the returned sender
    /// fires. Lets a test decide which in-flight request settles first.
    pub fn push_gated_quote(&self, result: Result<QuoteResponse, SwapError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.quote_script.lock().push_back(ScriptedQuote { gate: Some(rx), result });
        tx
    }

    pub fn push_swap(&self, result: Result<SwapResponse, SwapError>) {
        self.swap_script.lock().push_back(result);
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn swap_calls(&self) -> usize {
        self.swap_calls.load(Ordering::SeqCst)
    }

    pub fn last_quote_request(&self) -> Option<QuoteRequest> {
        self.last_quote_request.lock().clone()
    }

    pub fn last_swap_request(&self) -> Option<SwapRequest> {
        self.last_swap_request.lock().clone()
    }
}

#[async_trait]
impl RouteApi for ScriptedRouteApi {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, SwapError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_quote_request.lock() = Some(request.clone());

        let scripted = self.quote_script.lock().pop_front();
        match scripted {
            Some(ScriptedQuote { gate, result }) => {
                if let Some(rx) = gate {
                    let _ = rx.await;
                }
                result
            }
            None => Err(SwapError::QuoteFetch("no scripted quote response".to_string())),
        }
    }

    async fn build_swap_transaction(
        &self,
        request: &SwapRequest,
    ) -> Result<SwapResponse, SwapError> {
        self.swap_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_swap_request.lock() = Some(request.clone());

        self.swap_script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SwapError::SwapBuild("no scripted swap response".to_string())))
    }
}

/// Quote response fixture in the shape of the v6 API, with a route payload.
pub fn quote_response(out_amount: &str, price_impact_pct: &str) -> QuoteResponse {
    serde_json::from_value(json!({
        "inputMint": "So11111111111111111111111111111111111111112",
        "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        "outAmount": out_amount,
        "priceImpactPct": price_impact_pct,
        "swapMode": "ExactIn",
        "slippageBps": 50,
        "routePlan": [{"swapInfo": {"label": "Whirlpool"}, "percent": 100}],
    }))
    .expect("fixture quote must parse")
}

/// Commission config with a fresh recipient, so tests never depend on the
/// process environment.
pub fn test_commission() -> CommissionConfig {
    CommissionConfig {
        commission_bps: 400,
        commission_wallet: Pubkey::new_unique(),
        slippage_bps: 50,
    }
}

/// Base64 of a serialized unsigned transaction with the given fee payer,
/// shaped like the `/v6/swap` response payload.
pub fn unsigned_transaction_base64(fee_payer: &Pubkey) -> String {
    let instructions: Vec<solana_sdk::instruction::Instruction> = Vec::new();
    let message = VersionedMessage::Legacy(Message::new(&instructions, Some(fee_payer)));
    let transaction = VersionedTransaction { signatures: vec![Signature::default()], message };
    STANDARD.encode(bincode::serialize(&transaction).expect("fixture transaction must serialize"))
}

/// Wallet double that reports disconnected.
pub struct DisconnectedWallet;

#[async_trait]
impl WalletAdapter for DisconnectedWallet {
    fn is_connected(&self) -> bool {
        false
    }

    fn pubkey(&self) -> Option<Pubkey> {
        None
    }

    async fn sign_transaction(
        &self,
        _transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, SwapError> {
        Err(SwapError::WalletNotReady)
    }
}
