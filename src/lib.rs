//! Stochastic oscillator (%K / %D) over OHLC bar series.
//!
//! [`Stoch::compute`] takes any slice of [`Ohlcv`] bars and returns a
//! [`StochOutput`]: the timestamps, %K values, and (%K, %D) pairs for every
//! bar from `k_period - 1` on, index-aligned with each other. A series that
//! is too short or carries non-finite prices is rejected as a whole with a
//! [`StochError`]; flat windows are not errors and produce NaN.
//!
//! ```
//! use stochastic_ta::{Series, StochConfig, stoch};
//! use std::num::NonZero;
//!
//! let series = Series::from_rows([
//!     (1, [5.0, 6.0, 4.0, 5.0]),
//!     (2, [7.0, 8.0, 5.0, 7.0]),
//!     (3, [6.0, 7.0, 4.0, 6.0]),
//!     (4, [9.0, 10.0, 5.0, 9.0]),
//! ])?;
//!
//! let config = StochConfig::new(NonZero::new(3).unwrap(), NonZero::new(2).unwrap());
//! let output = stoch(&series, config)?;
//!
//! for record in output.records() {
//!     println!("{}: k={} d={:?}", record.timestamp, record.k, record.d);
//! }
//! # Ok::<(), stochastic_ta::StochError>(())
//! ```
//!
//! The building blocks are public too: [`extremes`] and [`ExtremumWindow`]
//! for window minima/maxima, and [`MovingAverage`] for the %D smoothing.

mod error;
mod extremes;
mod ohlcv;
mod price_source;
mod series;
mod sma;
mod stoch;

pub use crate::error::{MalformedReason, Result, StochError};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::{BAR_FIELDS, Bar, Series};

pub use crate::extremes::{ExtremumWindow, extremes};
pub use crate::sma::{MovingAverage, SimpleMovingAverage, sma};
pub use crate::stoch::{
    Stoch, StochConfig, StochConfigBuilder, StochOutput, StochRecord, StochValue, stoch,
};

#[cfg(test)]
mod test_util;
