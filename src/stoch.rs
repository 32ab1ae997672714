use std::{fmt::Display, num::NonZero};

use crate::{
    Ohlcv, Price, PriceSource, Timestamp,
    error::{Result, StochError},
    extremes::ExtremumWindow,
    series,
    sma::{MovingAverage, SimpleMovingAverage},
};

const DEFAULT_D_PERIOD: NonZero<usize> = NonZero::new(3).unwrap();

/// Configuration for the Stochastic Oscillator ([`Stoch`]).
///
/// # Example
///
/// ```
/// use stochastic_ta::StochConfig;
/// use std::num::NonZero;
///
/// let config = StochConfig::builder()
///     .k_period(NonZero::new(14).unwrap())
///     .build();
///
/// assert_eq!(config.k_period(), 14);
/// assert_eq!(config.d_period(), 3);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochConfig {
    k_period: NonZero<usize>,
    d_period: NonZero<usize>,
    low_source: PriceSource,
    high_source: PriceSource,
}

impl StochConfig {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> StochConfigBuilder {
        StochConfigBuilder::new()
    }

    /// Stochastic over low/high with the given %K and %D periods.
    #[must_use]
    pub fn new(k_period: NonZero<usize>, d_period: NonZero<usize>) -> Self {
        Self::builder().k_period(k_period).d_period(d_period).build()
    }

    /// STOCH(14, 3) over low/high, the common default setting.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn default_14_3() -> Self {
        Self::builder().k_period(NonZero::new(14).unwrap()).build()
    }

    /// Lookback window of %K in bars.
    #[inline]
    #[must_use]
    pub fn k_period(&self) -> usize {
        self.k_period.get()
    }

    /// Number of %K values averaged into each %D.
    #[inline]
    #[must_use]
    pub fn d_period(&self) -> usize {
        self.d_period.get()
    }

    /// Field the lowest low is taken from.
    #[inline]
    #[must_use]
    pub fn low_source(&self) -> PriceSource {
        self.low_source
    }

    /// Field the highest high is taken from.
    #[inline]
    #[must_use]
    pub fn high_source(&self) -> PriceSource {
        self.high_source
    }

    /// Index of the first bar with a %K value: `k_period - 1`.
    #[inline]
    #[must_use]
    pub fn k_lookback(&self) -> usize {
        self.k_period() - 1
    }

    /// Index of the first bar with a %D value: `k_period + d_period - 2`.
    #[inline]
    #[must_use]
    pub fn d_lookback(&self) -> usize {
        self.k_lookback() + self.d_period() - 1
    }

    /// Shortest series [`Stoch::compute`] accepts: `k_period` bars.
    #[inline]
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.k_period()
    }
}

impl Display for StochConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochConfig({}, {}, {}, {})",
            self.k_period, self.d_period, self.low_source, self.high_source
        )
    }
}

/// Builder for [`StochConfig`].
///
/// Defaults: `d_period` = 3, low source = [`PriceSource::Low`],
/// high source = [`PriceSource::High`].
/// `k_period` must be set before calling [`build`](StochConfigBuilder::build).
pub struct StochConfigBuilder {
    k_period: Option<NonZero<usize>>,
    d_period: NonZero<usize>,
    low_source: PriceSource,
    high_source: PriceSource,
}

impl StochConfigBuilder {
    fn new() -> Self {
        Self {
            k_period: None,
            d_period: DEFAULT_D_PERIOD,
            low_source: PriceSource::Low,
            high_source: PriceSource::High,
        }
    }

    /// Sets the %K lookback window.
    #[inline]
    #[must_use]
    pub fn k_period(mut self, k_period: NonZero<usize>) -> Self {
        self.k_period.replace(k_period);
        self
    }

    /// Sets the %D smoothing window.
    #[inline]
    #[must_use]
    pub fn d_period(mut self, d_period: NonZero<usize>) -> Self {
        self.d_period = d_period;
        self
    }

    /// Sets the field the lowest low is taken from.
    #[inline]
    #[must_use]
    pub fn low_source(mut self, source: PriceSource) -> Self {
        self.low_source = source;
        self
    }

    /// Sets the field the highest high is taken from.
    #[inline]
    #[must_use]
    pub fn high_source(mut self, source: PriceSource) -> Self {
        self.high_source = source;
        self
    }

    /// Builds the config.
    ///
    /// # Panics
    ///
    /// Panics if `k_period` was not set.
    #[inline]
    #[must_use]
    pub fn build(self) -> StochConfig {
        StochConfig {
            k_period: self.k_period.expect("k_period is required"),
            d_period: self.d_period,
            low_source: self.low_source,
            high_source: self.high_source,
        }
    }
}

/// One oscillator sample: %K and, once the smoothing window is full, %D.
///
/// %K is NaN when the window is flat (`highest high == lowest low`); every
/// %D whose window includes such a %K is NaN as well.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochValue {
    k: Price,
    d: Option<Price>,
}

impl StochValue {
    /// %K: position of the close within the window range, scaled to 0–100.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// %D: simple moving average of the last `d_period` %K values, `None`
    /// until that many exist.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Option<Price> {
        self.d
    }
}

impl Display for StochValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.d {
            Some(d) => write!(f, "STOCH(k: {}, d: {d})", self.k),
            None => write!(f, "STOCH(k: {}, d: -)", self.k),
        }
    }
}

/// A [`StochValue`] with the timestamp of the bar it was computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochRecord {
    /// Timestamp of the bar closing the %K window.
    pub timestamp: Timestamp,
    /// %K at that bar.
    pub k: Price,
    /// %D at that bar, if the smoothing window is full.
    pub d: Option<Price>,
}

/// Result of [`Stoch::compute`]: three index-aligned sequences.
///
/// Position `j` corresponds to input bar `j + k_period - 1`. All three
/// sequences have `len - k_period + 1` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StochOutput {
    timestamps: Vec<Timestamp>,
    k: Vec<Price>,
    values: Vec<StochValue>,
}

impl StochOutput {
    /// Timestamps of the bars each record was computed at.
    #[inline]
    #[must_use]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// %K values.
    #[inline]
    #[must_use]
    pub fn k(&self) -> &[Price] {
        &self.k
    }

    /// (%K, %D) pairs.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[StochValue] {
        &self.values
    }

    /// Iterates `(timestamp, k, d)` records in series order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = StochRecord> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(|(&timestamp, value)| StochRecord {
                timestamp,
                k: value.k,
                d: value.d,
            })
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether there are no records. Never true for a successful
    /// computation, since at least one full window is required.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Consumes the output, returning `(timestamps, k, values)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Timestamp>, Vec<Price>, Vec<StochValue>) {
        (self.timestamps, self.k, self.values)
    }
}

/// Stochastic Oscillator (STOCH).
///
/// A momentum oscillator placing each close within the range of the last
/// `k_period` bars:
///
/// ```text
/// %K = (close − lowest low) / (highest high − lowest low) × 100
/// %D = SMA(%K, d_period)
/// ```
///
/// Computation is a single forward pass over the series using a monotonic
/// window for the extremes (O(1) amortized per bar), followed by a second pass
/// that smooths the buffered %K values into %D. Nothing is observable until
/// both passes are done.
///
/// `Stoch` holds no state between calls; one instance can be shared across
/// threads and reused for any number of series.
///
/// # Example
///
/// ```
/// use stochastic_ta::{Bar, Stoch, StochConfig};
/// use std::num::NonZero;
///
/// let bars = [
///     Bar::new(5.0, 6.0, 4.0, 5.0).at(1),
///     Bar::new(7.0, 8.0, 5.0, 7.0).at(2),
///     Bar::new(6.0, 7.0, 4.0, 6.0).at(3),
///     Bar::new(9.0, 10.0, 5.0, 9.0).at(4),
/// ];
///
/// let stoch = Stoch::new(StochConfig::new(NonZero::new(3).unwrap(), NonZero::new(2).unwrap()));
/// let output = stoch.compute(&bars).unwrap();
///
/// assert_eq!(output.timestamps(), &[3, 4]);
/// assert_eq!(output.k()[0], 50.0);
/// assert_eq!(output.values()[0].d(), None);
/// assert!(output.values()[1].d().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Stoch<A: MovingAverage = SimpleMovingAverage> {
    config: StochConfig,
    average: A,
}

impl Stoch {
    /// Creates an oscillator smoothing %D with [`SimpleMovingAverage`].
    #[must_use]
    pub fn new(config: StochConfig) -> Self {
        Self::with_average(config, SimpleMovingAverage)
    }
}

impl<A: MovingAverage> Stoch<A> {
    /// Creates an oscillator smoothing %D with a custom [`MovingAverage`].
    #[must_use]
    pub fn with_average(config: StochConfig, average: A) -> Self {
        Self { config, average }
    }

    /// The configuration this oscillator was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StochConfig {
        &self.config
    }

    /// Computes %K and %D for every bar from index `k_period - 1` on.
    ///
    /// The series is checked up front; on error nothing is computed.
    ///
    /// # Errors
    ///
    /// - [`StochError::MalformedSeries`] if a bar has a non-finite price or
    ///   its timestamp precedes the previous bar's.
    /// - [`StochError::InsufficientData`] if the series has fewer than
    ///   `k_period` bars.
    pub fn compute(&self, bars: &[impl Ohlcv]) -> Result<StochOutput> {
        if let Err(err) = self.check(bars) {
            tracing::debug!(%err, config = %self.config, bars = bars.len(), "series rejected");
            return Err(err);
        }

        let (timestamps, k) = self.percent_k(bars);
        let values = self.attach_d(&k);

        tracing::trace!(config = %self.config, records = k.len(), "stochastic computed");

        Ok(StochOutput {
            timestamps,
            k,
            values,
        })
    }

    fn check(&self, bars: &[impl Ohlcv]) -> Result<()> {
        series::validate(bars)?;

        if bars.len() < self.config.min_len() {
            return Err(StochError::InsufficientData {
                required: self.config.min_len(),
                actual: bars.len(),
            });
        }

        Ok(())
    }

    /// First pass: one %K per full window.
    fn percent_k(&self, bars: &[impl Ohlcv]) -> (Vec<Timestamp>, Vec<Price>) {
        let len = bars.len() - self.config.k_lookback();
        let mut timestamps = Vec::with_capacity(len);
        let mut k = Vec::with_capacity(len);

        let mut window = ExtremumWindow::new(
            self.config.k_period,
            self.config.low_source,
            self.config.high_source,
        );

        for bar in bars {
            if let Some((lowest, highest)) = window.push(bar) {
                timestamps.push(bar.timestamp());
                k.push(percent_k(bar.close(), lowest, highest));
            }
        }

        debug_assert_eq!(k.len(), len);
        (timestamps, k)
    }

    /// Second pass: pair each %K with its %D, if its smoothing window is full.
    fn attach_d(&self, k: &[Price]) -> Vec<StochValue> {
        let d = self.average.average(k, self.config.d_period);
        let offset = self.config.d_period() - 1;

        debug_assert_eq!(
            d.len(),
            k.len().saturating_sub(offset),
            "{:?} returned the wrong number of averages",
            self.average,
        );

        k.iter()
            .enumerate()
            .map(|(j, &k)| StochValue {
                k,
                d: j.checked_sub(offset).and_then(|i| d.get(i).copied()),
            })
            .collect()
    }
}

impl<A: MovingAverage> Display for Stoch<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCH({}, {})",
            self.config.k_period, self.config.d_period
        )
    }
}

/// Computes the oscillator with [`SimpleMovingAverage`] smoothing.
///
/// Shorthand for `Stoch::new(config).compute(bars)`.
///
/// # Errors
///
/// See [`Stoch::compute`].
pub fn stoch(bars: &[impl Ohlcv], config: StochConfig) -> Result<StochOutput> {
    Stoch::new(config).compute(bars)
}

/// %K for one window. A flat window (`highest == lowest`) yields NaN.
#[inline]
fn percent_k(close: Price, lowest: Price, highest: Price) -> Price {
    let range = highest - lowest;
    if range == 0.0 {
        return f64::NAN;
    }

    (close - lowest) / range * 100.0
}
