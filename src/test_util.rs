// src/test_util.rs

use crate::{Bar, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`. Not usable with an expected `0.0`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub fn ohlc(open: Price, high: Price, low: Price, close: Price, time: Timestamp) -> Bar {
    Bar::new(open, high, low, close).at(time)
}

/// Bar described by what the oscillator reads: close, low, high.
/// Open is set to the close.
pub fn clh(close: Price, low: Price, high: Price, time: Timestamp) -> Bar {
    Bar::new(close, high, low, close).at(time)
}

/// Convenience: flat bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: Price, time: Timestamp) -> Bar {
    Bar::new(close, close, close, close).at(time)
}
