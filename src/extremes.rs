//! Lowest low and highest high over a window of bars.
//!
//! [`extremes`] recomputes both from scratch on every call. [`ExtremumWindow`]
//! slides along a series keeping two monotonic deques, so each step is O(1)
//! amortized instead of O(window). Both return identical values for the same
//! window.

use crate::{Ohlcv, Price, PriceSource};

use std::{collections::VecDeque, num::NonZero};

/// Returns `(min low, max high)` across every bar in `bars`.
///
/// `low` and `high` select the field read for each side; the oscillator
/// defaults are [`PriceSource::Low`] and [`PriceSource::High`].
///
/// `bars` must not be empty and every selected price must be finite, as any
/// [`Series`](crate::Series) or input accepted by
/// [`Stoch::compute`](crate::Stoch::compute) guarantees. Both are checked in
/// debug builds only; in release an empty slice yields `(inf, -inf)` and a
/// NaN is skipped.
///
/// # Example
///
/// ```
/// use stochastic_ta::{Bar, PriceSource, extremes};
///
/// let bars = [
///     Bar::new(5.0, 6.0, 4.0, 5.0),
///     Bar::new(7.0, 8.0, 5.0, 7.0),
///     Bar::new(6.0, 7.0, 4.0, 6.0),
/// ];
///
/// assert_eq!(extremes(&bars, PriceSource::Low, PriceSource::High), (4.0, 8.0));
/// ```
#[must_use]
pub fn extremes(bars: &[impl Ohlcv], low: PriceSource, high: PriceSource) -> (Price, Price) {
    debug_assert!(!bars.is_empty(), "extremes of an empty window");

    bars.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min_low, max_high), bar| {
            let (bar_low, bar_high) = (low.extract(bar), high.extract(bar));
            debug_assert!(
                bar_low.is_finite() && bar_high.is_finite(),
                "non-finite price in window"
            );
            (min_low.min(bar_low), max_high.max(bar_high))
        },
    )
}

/// Sliding `(min low, max high)` over the last `size` bars pushed.
///
/// Keeps `(position, value)` pairs in two deques: lows strictly increasing
/// from front to back, highs strictly decreasing. The front of each is the
/// current extremum; entries fall off the front once they leave the window.
///
/// Pushed prices must be finite, which validated input guarantees. A NaN
/// would never be popped from a deque and is rejected in debug builds.
///
/// # Example
///
/// ```
/// use stochastic_ta::{Bar, ExtremumWindow, PriceSource};
/// use std::num::NonZero;
///
/// let size = NonZero::new(2).unwrap();
/// let mut window = ExtremumWindow::new(size, PriceSource::Low, PriceSource::High);
///
/// assert_eq!(window.push(&Bar::new(5.0, 6.0, 4.0, 5.0)), None);
/// assert_eq!(window.push(&Bar::new(7.0, 8.0, 5.0, 7.0)), Some((4.0, 8.0)));
/// assert_eq!(window.push(&Bar::new(6.0, 7.0, 4.5, 6.0)), Some((4.5, 8.0)));
/// ```
#[derive(Clone, Debug)]
pub struct ExtremumWindow {
    size: usize,
    low_source: PriceSource,
    high_source: PriceSource,
    lows: VecDeque<(usize, Price)>,
    highs: VecDeque<(usize, Price)>,
    /// Number of bars pushed so far; also the position of the next bar.
    seen: usize,
}

impl ExtremumWindow {
    /// Creates an empty window spanning `size` bars.
    #[must_use]
    pub fn new(size: NonZero<usize>, low_source: PriceSource, high_source: PriceSource) -> Self {
        let size = size.get();

        Self {
            size,
            low_source,
            high_source,
            lows: VecDeque::with_capacity(size),
            highs: VecDeque::with_capacity(size),
            seen: 0,
        }
    }

    /// Number of bars the window spans.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds the next bar and returns the extremes of the last `size` bars,
    /// or `None` while fewer than `size` bars have been pushed.
    #[inline]
    pub fn push(&mut self, bar: &impl Ohlcv) -> Option<(Price, Price)> {
        let position = self.seen;
        self.seen += 1;

        let low = self.low_source.extract(bar);
        let high = self.high_source.extract(bar);
        debug_assert!(low.is_finite() && high.is_finite(), "non-finite price in window");

        while self.lows.back().is_some_and(|&(_, back)| back >= low) {
            self.lows.pop_back();
        }
        self.lows.push_back((position, low));

        while self.highs.back().is_some_and(|&(_, back)| back <= high) {
            self.highs.pop_back();
        }
        self.highs.push_back((position, high));

        // Oldest position still inside the window.
        let start = self.seen.saturating_sub(self.size);
        while self.lows.front().is_some_and(|&(p, _)| p < start) {
            self.lows.pop_front();
        }
        while self.highs.front().is_some_and(|&(p, _)| p < start) {
            self.highs.pop_front();
        }

        self.value()
    }

    /// Extremes of the current window without advancing it.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<(Price, Price)> {
        if self.seen < self.size {
            return None;
        }

        match (self.lows.front(), self.highs.front()) {
            (Some(&(_, low)), Some(&(_, high))) => Some((low, high)),
            _ => None,
        }
    }
}
