//! Error taxonomy for the quote and submission workflows.
//!
//! Every variant carries a user-presentable `Display` message; no step of the
//! workflow is allowed to fail silently or leave the caller unable to retry.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SwapError {
    /// Local validation: the typed amount is not a positive finite number.
    /// No network call is made.
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// The quote request failed: network error, non-success status (the body
    /// text is included) or a transport-level problem.
    #[error("Failed to fetch price: {0}")]
    QuoteFetch(String),

    /// The quote response parsed but lacks the fields we need.
    #[error("Invalid quote response")]
    MalformedQuote,

    /// The routed trade would move the price beyond the accepted ceiling.
    /// The quote is discarded and submission stays blocked.
    #[error("Price impact too high ({pct:.2}% > {max:.0}%). Please try a smaller amount.")]
    PriceImpactTooHigh { pct: f64, max: f64 },

    #[error("Wallet is not connected or does not support signing transactions")]
    WalletNotReady,

    #[error("Source and destination assets are identical")]
    SameAsset,

    /// No quote is held for the exact current (source, destination, amount).
    #[error("No valid quote for the current inputs")]
    MissingQuote,

    #[error("Quoted output amount is zero")]
    ZeroOutput,

    /// A quote-stage error is still displayed; it must clear before swapping.
    #[error("Resolve the current quote error before swapping: {0}")]
    ErrorPending(String),

    #[error("Failed to build swap transaction: {0}")]
    SwapBuild(String),

    #[error("Failed to decode swap transaction: {0}")]
    TransactionDecode(String),

    #[error("Wallet declined to sign the transaction: {0}")]
    Signing(String),

    #[error("Failed to broadcast transaction: {0}")]
    Broadcast(String),

    #[error("Transaction was not confirmed: {0}")]
    Confirmation(String),

    /// The blockhash validity window closed before the signature confirmed.
    #[error("Transaction expired: blockhash is no longer valid")]
    BlockhashExpired,
}
