//! Rounding Utilities
//!
//! Yield figures are rounded exactly once, at crop level, to strip
//! floating-point noise such as `18.000000000000004`.

use rust_decimal::{Decimal, RoundingStrategy};

/// From 2^52 up every f64 is an integer
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// Round to `decimals` places, ties away from zero
///
/// Rounds the exact decimal value of the double, as fixed-point formatting
/// does: `1.7249999999999999` is stored just below the tie and becomes
/// `1.72`. Non-finite and already-integral magnitudes pass through unchanged.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() || value.abs() >= INTEGRAL_THRESHOLD {
        return value;
    }

    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };

    let rounded = exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    // str -> f64 parsing picks the nearest double
    rounded.to_string().parse::<f64>().unwrap_or(value)
}
