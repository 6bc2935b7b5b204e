//! Mint addresses and metadata for the fixed asset catalog.
//!
//! The swap surface trades a small, hardcoded set of mainnet tokens; nothing
//! is added or mutated at runtime.

use solana_sdk::pubkey;

pub use solana_sdk::pubkey::Pubkey;

/// SOL Mint (Wrapped SOL)
pub const SOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// USDC Mint (mainnet)
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

/// USDT Mint (mainnet)
pub const USDT_MINT: Pubkey = pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");

/// BONK Mint (mainnet)
pub const BONK_MINT: Pubkey = pubkey!("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263");

/// WIF Mint (mainnet)
pub const WIF_MINT: Pubkey = pubkey!("EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm");

/// BEEMX Mint (mainnet)
pub const BEEMX_MINT: Pubkey = pubkey!("ACMk9h76WrHaLFy7GYZB4yCea62KruCyj9jFQGq15P6o");

/// A swappable asset: symbol, mint address and decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub symbol: &'static str,
    pub mint: Pubkey,
    pub decimals: u8,
}

/// The fixed catalog offered by the swap surface.
pub const ASSETS: [Asset; 6] = [
    Asset { symbol: "SOL", mint: SOL_MINT, decimals: 9 },
    Asset { symbol: "USDC", mint: USDC_MINT, decimals: 6 },
    Asset { symbol: "USDT", mint: USDT_MINT, decimals: 6 },
    Asset { symbol: "BONK", mint: BONK_MINT, decimals: 5 },
    Asset { symbol: "WIF", mint: WIF_MINT, decimals: 6 },
    Asset { symbol: "BEEMX", mint: BEEMX_MINT, decimals: 6 },
];

impl Asset {
    /// Look up a catalog asset by its symbol (case-sensitive).
    pub fn by_symbol(symbol: &str) -> Option<&'static Asset> {
        ASSETS.iter().find(|asset| asset.symbol == symbol)
    }

    /// Look up a catalog asset by its mint address.
    pub fn by_mint(mint: &Pubkey) -> Option<&'static Asset> {
        ASSETS.iter().find(|asset| asset.mint == *mint)
    }
}
