//! Workflow constants for the swap surface.

use once_cell::sync::Lazy;
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;

/// Fixed slippage tolerance attached to every quote request (0.5%).
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Fixed commission rate attached to every quote request (4%).
pub const DEFAULT_COMMISSION_BPS: u16 = 400;

/// Quotes with a price impact above this percentage are rejected outright.
pub const MAX_PRICE_IMPACT_PCT: f64 = 20.0;

/// Quiet window before a typed amount triggers a quote fetch.
pub const QUOTE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Network-side retry count when broadcasting the signed transaction.
pub const BROADCAST_MAX_RETRIES: usize = 2;

/// Polling interval while waiting for the signature to confirm.
pub const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Fallback commission recipient when `COMMISSION_WALLET` is not set.
pub const DEFAULT_COMMISSION_WALLET: Pubkey =
    pubkey!("2YTTbiNn4tQ14sXMC1L2HivhRo8JURS1UzPcdk6UyTRx");

/// Commission recipient, read once from the `COMMISSION_WALLET` environment
/// variable with a hardcoded fallback. An unparsable value falls back too.
pub static COMMISSION_WALLET: Lazy<Pubkey> = Lazy::new(|| {
    match std::env::var("COMMISSION_WALLET") {
        Ok(value) => match Pubkey::from_str(&value) {
            Ok(pubkey) => pubkey,
            Err(e) => {
                tracing::warn!("COMMISSION_WALLET is not a valid pubkey ({e}), using fallback");
                DEFAULT_COMMISSION_WALLET
            }
        },
        Err(_) => DEFAULT_COMMISSION_WALLET,
    }
});
