/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar timestamp or sequence number.
///
/// Must be non-decreasing across a series. The oscillator copies it verbatim
/// into [`StochOutput::timestamps`](crate::StochOutput::timestamps).
pub type Timestamp = u64;

/// OHLC bar data used as input to the oscillator.
///
/// Implement this on your own kline/candle type to avoid converting a whole
/// series before computing. [`Stoch::compute`](crate::Stoch::compute) accepts
/// `&[impl Ohlcv]` and only ever reads through this trait.
///
/// # Example
///
/// ```
/// use stochastic_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn timestamp(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar timestamp or sequence number.
    fn timestamp(&self) -> Timestamp;
}

impl<T: Ohlcv + ?Sized> Ohlcv for &T {
    #[inline]
    fn open(&self) -> Price {
        (**self).open()
    }

    #[inline]
    fn high(&self) -> Price {
        (**self).high()
    }

    #[inline]
    fn low(&self) -> Price {
        (**self).low()
    }

    #[inline]
    fn close(&self) -> Price {
        (**self).close()
    }

    #[inline]
    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}
