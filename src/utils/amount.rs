//! Conversion between display amounts and integer base units.
//!
//! Wire amounts are always integer base units of the relevant mint; display
//! amounts are `f64` in whole-token terms.

/// Convert a display amount to integer base units, truncating toward zero.
///
/// Returns `None` for non-finite or non-positive amounts, and for amounts
/// that would overflow `u64` after scaling.
pub fn to_base_units(amount: f64, decimals: u8) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let scaled = amount * 10f64.powi(decimals as i32);
    if scaled >= u64::MAX as f64 {
        return None;
    }
    Some(scaled as u64)
}

/// Convert integer base units back to a display amount.
pub fn from_base_units(base_units: u64, decimals: u8) -> f64 {
    base_units as f64 / 10f64.powi(decimals as i32)
}
