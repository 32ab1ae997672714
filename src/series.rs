use crate::{
    Ohlcv, Price, Timestamp,
    error::{MalformedReason, Result, StochError},
};

use std::{fmt::Display, ops::Deref};

/// Number of price fields a bar carries: open, high, low, close.
pub const BAR_FIELDS: usize = 4;

/// A fixed-shape OHLC bar.
///
/// Use this when prices arrive as loose positional rows: [`Bar::from_row`]
/// checks the shape once, after which every field is addressed by name.
///
/// # Example
///
/// ```
/// use stochastic_ta::{Bar, Ohlcv};
///
/// let bar = Bar::from_row(7, &[10.0, 12.0, 9.0, 11.0]).unwrap();
/// assert_eq!(bar.high(), 12.0);
/// assert_eq!(bar.timestamp(), 7);
///
/// assert!(Bar::from_row(8, &[10.0, 12.0, 9.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    timestamp: Timestamp,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
}

impl Bar {
    /// Creates a bar at timestamp `0`. Chain [`at`](Bar::at) to place it.
    #[must_use]
    pub fn new(open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            timestamp: 0,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns the same bar at `timestamp`.
    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builds a bar from a positional `[open, high, low, close]` row.
    ///
    /// # Errors
    ///
    /// [`MalformedReason::FieldCount`] if the row does not hold exactly four
    /// values, [`MalformedReason::NonFinite`] if any of them is NaN or
    /// infinite.
    pub fn from_row(
        timestamp: Timestamp,
        row: &[Price],
    ) -> std::result::Result<Self, MalformedReason> {
        let &[open, high, low, close] = row else {
            return Err(MalformedReason::FieldCount {
                expected: BAR_FIELDS,
                actual: row.len(),
            });
        };

        let bar = Self::new(open, high, low, close).at(timestamp);
        check_finite(&bar)?;

        Ok(bar)
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bar({}: o={}, h={}, l={}, c={})",
            self.timestamp, self.open, self.high, self.low, self.close
        )
    }
}

/// A validated, time-ordered sequence of [`Bar`]s.
///
/// Every bar carries four finite prices and timestamps never decrease.
/// Derefs to `[Bar]` for read-only access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validates and wraps already typed bars.
    ///
    /// # Errors
    ///
    /// [`StochError::MalformedSeries`] naming the first non-finite or
    /// out-of-order bar.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        validate(&bars)?;
        Ok(Self { bars })
    }

    /// Ingests `(timestamp, [open, high, low, close])` rows.
    ///
    /// The first malformed row aborts ingestion; nothing is returned for the
    /// rows before it.
    ///
    /// # Errors
    ///
    /// [`StochError::MalformedSeries`] naming the first row with the wrong
    /// field count, a non-finite value, or a decreasing timestamp.
    ///
    /// # Example
    ///
    /// ```
    /// use stochastic_ta::Series;
    ///
    /// let series = Series::from_rows([
    ///     (1, vec![5.0, 6.0, 4.0, 5.0]),
    ///     (2, vec![7.0, 8.0, 5.0, 7.0]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Timestamp, R)>,
        R: AsRef<[Price]>,
    {
        let rows = rows.into_iter();
        let mut bars = Vec::with_capacity(rows.size_hint().0);

        for (index, (timestamp, row)) in rows.enumerate() {
            let bar = Bar::from_row(timestamp, row.as_ref())
                .map_err(|reason| StochError::MalformedSeries { index, reason })?;

            if let Some(previous) = bars.last() {
                check_order(index, previous, &bar)?;
            }
            bars.push(bar);
        }

        Ok(Self { bars })
    }

    /// The underlying bars.
    #[inline]
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Consumes the series, returning its bars.
    #[must_use]
    pub fn into_inner(self) -> Vec<Bar> {
        self.bars
    }
}

impl Deref for Series {
    type Target = [Bar];

    #[inline]
    fn deref(&self) -> &[Bar] {
        &self.bars
    }
}

impl AsRef<[Bar]> for Series {
    #[inline]
    fn as_ref(&self) -> &[Bar] {
        &self.bars
    }
}

/// Checks every bar for finite prices and non-decreasing timestamps.
pub(crate) fn validate(bars: &[impl Ohlcv]) -> Result<()> {
    for (index, bar) in bars.iter().enumerate() {
        check_finite(bar).map_err(|reason| StochError::MalformedSeries { index, reason })?;

        if index > 0 {
            check_order(index, &bars[index - 1], bar)?;
        }
    }

    Ok(())
}

fn check_finite(bar: &impl Ohlcv) -> std::result::Result<(), MalformedReason> {
    let fields = [
        ("open", bar.open()),
        ("high", bar.high()),
        ("low", bar.low()),
        ("close", bar.close()),
    ];

    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, _)) => Err(MalformedReason::NonFinite { field }),
        None => Ok(()),
    }
}

fn check_order(index: usize, previous: &impl Ohlcv, current: &impl Ohlcv) -> Result<()> {
    if current.timestamp() < previous.timestamp() {
        return Err(StochError::MalformedSeries {
            index,
            reason: MalformedReason::Unordered {
                previous: previous.timestamp(),
                current: current.timestamp(),
            },
        });
    }

    Ok(())
}
