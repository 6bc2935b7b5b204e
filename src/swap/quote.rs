//! Quote controller: keeps the displayed output amount and price impact
//! consistent with the latest valid user input.
//!
//! Input events debounce into at most one quote fetch per quiet window, and
//! every fetch carries the state sequence number it was issued under. A
//! response (success or failure) is applied only if that sequence number is
//! still current, so a stale in-flight response can never overwrite newer
//! state regardless of settle order.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::common::jupiter_api::{QuoteRequest, QuoteResponse, RouteApi};
use crate::common::types::CommissionConfig;
use crate::constants::tokens::{ASSETS, Asset};
use crate::constants::{MAX_PRICE_IMPACT_PCT, QUOTE_DEBOUNCE};
use crate::swap::debounce::Debouncer;
use crate::swap::error::SwapError;
use crate::utils::amount::{from_base_units, to_base_units};

struct QuoteState {
    from_asset: Asset,
    to_asset: Asset,
    from_amount: f64,
    to_amount: f64,
    price_impact_pct: f64,
    quote: Option<QuoteResponse>,
    error: Option<String>,
    /// Fetches currently in flight; the UI shows a loading state while > 0.
    inflight: usize,
    /// Bumped on every change to (from_asset, to_asset, from_amount).
    /// A fetch result is applied only if this still matches the value
    /// captured when the fetch started.
    seq: u64,
}

/// Plain copy of the controller state, taken under the lock, for display and
/// for handing to the submitter.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    pub from_asset: Asset,
    pub to_asset: Asset,
    pub from_amount: f64,
    pub to_amount: f64,
    pub price_impact_pct: f64,
    pub quote: Option<QuoteResponse>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct QuoteController {
    state: Arc<Mutex<QuoteState>>,
    api: Arc<dyn RouteApi>,
    commission: CommissionConfig,
    debouncer: Arc<Debouncer>,
}

impl QuoteController {
    /// New controller over the default pair (SOL -> USDC).
    pub fn new(api: Arc<dyn RouteApi>, commission: CommissionConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(QuoteState {
                from_asset: ASSETS[0],
                to_asset: ASSETS[1],
                from_amount: 0.0,
                to_amount: 0.0,
                price_impact_pct: 0.0,
                quote: None,
                error: None,
                inflight: 0,
                seq: 0,
            })),
            api,
            commission,
            debouncer: Arc::new(Debouncer::new(QUOTE_DEBOUNCE)),
        }
    }

    pub fn snapshot(&self) -> QuoteSnapshot {
        let state = self.state.lock();
        QuoteSnapshot {
            from_asset: state.from_asset,
            to_asset: state.to_asset,
            from_amount: state.from_amount,
            to_amount: state.to_amount,
            price_impact_pct: state.price_impact_pct,
            quote: state.quote.clone(),
            error: state.error.clone(),
            loading: state.inflight > 0,
        }
    }

    /// Change the source asset. Output, error and any held quote reset; the
    /// held quote was priced for the old pair and must not survive.
    pub fn set_from_asset(&self, asset: Asset) {
        let mut state = self.state.lock();
        state.from_asset = asset;
        Self::reset_on_input_change(&mut state);
    }

    /// Change the destination asset. Same reset rules as the source side.
    pub fn set_to_asset(&self, asset: Asset) {
        let mut state = self.state.lock();
        state.to_asset = asset;
        Self::reset_on_input_change(&mut state);
    }

    /// Record a typed amount and debounce-schedule a quote fetch for it.
    /// Must be called inside a tokio runtime.
    pub fn set_from_amount(&self, amount: f64) {
        {
            let mut state = self.state.lock();
            state.from_amount = amount;
            state.error = None;
            state.quote = None;
            state.seq += 1;
        }

        if amount > 0.0 {
            let controller = self.clone();
            self.debouncer.schedule(move || async move {
                controller.fetch_quote(amount).await;
            });
        }
    }

    /// Fee charged on the current input, in display units of the source
    /// asset.
    pub fn commission_amount(&self) -> f64 {
        let amount = self.state.lock().from_amount;
        self.commission.commission_amount(amount)
    }

    /// Fetch a quote for `amount` against the current asset pair and apply
    /// the result if the inputs have not changed in the meantime.
    pub async fn fetch_quote(&self, amount: f64) {
        let (from_asset, to_asset, issued_seq) = {
            let mut state = self.state.lock();
            if !amount.is_finite() || amount <= 0.0 {
                state.error = Some(SwapError::InvalidAmount.to_string());
                return;
            }
            state.error = None;
            state.inflight += 1;
            (state.from_asset, state.to_asset, state.seq)
        };

        let result = self.request_quote(&from_asset, &to_asset, amount).await;

        let mut state = self.state.lock();
        state.inflight -= 1;

        if state.seq != issued_seq {
            debug!(issued_seq, current_seq = state.seq, "discarding stale quote result");
            return;
        }

        match result {
            Ok(applied) => {
                state.price_impact_pct = applied.price_impact_pct;
                state.to_amount = applied.to_amount;
                state.quote = Some(applied.quote);
                state.error = None;
            }
            Err(e) => {
                warn!("quote fetch failed: {e}");
                if let SwapError::PriceImpactTooHigh { pct, .. } = &e {
                    state.price_impact_pct = *pct;
                }
                state.error = Some(e.to_string());
                state.to_amount = 0.0;
                state.quote = None;
            }
        }
    }

    async fn request_quote(
        &self,
        from_asset: &Asset,
        to_asset: &Asset,
        amount: f64,
    ) -> Result<AppliedQuote, SwapError> {
        let base_amount =
            to_base_units(amount, from_asset.decimals).ok_or(SwapError::InvalidAmount)?;

        let request = QuoteRequest {
            input_mint: from_asset.mint.to_string(),
            output_mint: to_asset.mint.to_string(),
            amount: base_amount,
            slippage_bps: self.commission.slippage_bps,
            fee_bps: self.commission.commission_bps,
        };

        let quote = self.api.get_quote(&request).await?;

        let price_impact_pct = quote.price_impact_percent();
        if price_impact_pct > MAX_PRICE_IMPACT_PCT {
            return Err(SwapError::PriceImpactTooHigh {
                pct: price_impact_pct,
                max: MAX_PRICE_IMPACT_PCT,
            });
        }

        let to_amount = from_base_units(quote.out_amount_base_units()?, to_asset.decimals);

        Ok(AppliedQuote { to_amount, price_impact_pct, quote })
    }

    fn reset_on_input_change(state: &mut QuoteState) {
        state.to_amount = 0.0;
        state.price_impact_pct = 0.0;
        state.error = None;
        state.quote = None;
        state.seq += 1;
    }
}

struct AppliedQuote {
    to_amount: f64,
    price_impact_pct: f64,
    quote: QuoteResponse,
}
