use crate::Price;

use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

/// A windowed averaging primitive used to smooth %K into %D.
///
/// Given `samples` and a `period`, returns one value per full window: element
/// `j` covers `samples[j..j + period]`, so the result holds
/// `samples.len() - period + 1` values, or none when there are fewer samples
/// than `period`.
///
/// The oscillator makes no assumption about how the average is computed
/// beyond this shape; plug a different implementation in with
/// [`Stoch::with_average`](crate::Stoch::with_average).
pub trait MovingAverage: Debug {
    /// Averages every full `period`-sized window of `samples`.
    fn average(&self, samples: &[Price], period: NonZero<usize>) -> Vec<Price>;
}

/// Simple Moving Average (SMA).
///
/// Unweighted mean of each window. Every window is summed from its own
/// samples, so one huge value cannot disturb the windows after it has slid
/// out. A window holding any NaN averages to NaN.
///
/// # Example
///
/// ```rust
/// use stochastic_ta::{MovingAverage, SimpleMovingAverage};
/// use std::num::NonZero;
///
/// let means = SimpleMovingAverage.average(&[10.0, 20.0, 30.0, 40.0], NonZero::new(3).unwrap());
///
/// assert_eq!(means, vec![20.0, 30.0]);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct SimpleMovingAverage;

impl MovingAverage for SimpleMovingAverage {
    fn average(&self, samples: &[Price], period: NonZero<usize>) -> Vec<Price> {
        #[allow(clippy::cast_precision_loss)]
        let length = period.get() as f64;

        samples
            .windows(period.get())
            .map(|window| {
                if window.iter().any(|sample| sample.is_nan()) {
                    f64::NAN
                } else {
                    window.iter().sum::<Price>() / length
                }
            })
            .collect()
    }
}

impl Display for SimpleMovingAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA")
    }
}

/// Shorthand for [`SimpleMovingAverage::average`].
#[must_use]
pub fn sma(samples: &[Price], period: NonZero<usize>) -> Vec<Price> {
    SimpleMovingAverage.average(samples, period)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::assert_approx;

    fn nz(n: usize) -> NonZero<usize> {
        NonZero::new(n).unwrap()
    }

    mod filling {
        use super::*;

        #[test]
        fn empty_when_fewer_samples_than_period() {
            assert!(sma(&[10.0, 20.0], nz(3)).is_empty());
            assert!(sma(&[], nz(1)).is_empty());
        }

        #[test]
        fn single_window_gives_single_mean() {
            assert_eq!(sma(&[10.0, 20.0, 30.0], nz(3)), vec![20.0]);
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn drops_oldest_on_advance() {
            // (10+20)/2, (20+30)/2, (30+40)/2
            assert_eq!(sma(&[10.0, 20.0, 30.0, 40.0], nz(2)), vec![15.0, 25.0, 35.0]);
        }

        #[test]
        fn period_one_is_identity() {
            let samples = [3.0, 1.0, 4.0, 1.0, 5.0];
            assert_eq!(sma(&samples, nz(1)), samples.to_vec());
        }

        #[test]
        fn output_length() {
            let samples: Vec<f64> = (0..50).map(f64::from).collect();
            assert_eq!(sma(&samples, nz(7)).len(), 44);
        }

        #[test]
        fn matches_direct_mean() {
            let samples = [50.0, 83.0, 12.5, 99.0, 0.0, 64.25, 33.0];
            let means = sma(&samples, nz(3));
            for (j, mean) in means.iter().enumerate() {
                let direct = samples[j..j + 3].iter().sum::<f64>() / 3.0;
                assert_approx!(*mean, direct);
            }
        }
    }

    mod nan {
        use super::*;

        #[test]
        fn poisons_only_windows_containing_it() {
            let means = sma(&[10.0, f64::NAN, 30.0, 40.0, 50.0], nz(2));
            assert!(means[0].is_nan());
            assert!(means[1].is_nan());
            assert_eq!(means[2], 35.0);
            assert_eq!(means[3], 45.0);
        }

        #[test]
        fn consecutive_nans() {
            let means = sma(&[f64::NAN, f64::NAN, 1.0, 3.0], nz(2));
            assert!(means[0].is_nan());
            assert!(means[1].is_nan());
            assert_eq!(means[2], 2.0);
        }
    }

    mod magnitude {
        use super::*;

        #[test]
        fn small_samples_survive_a_huge_neighbour() {
            let means = sma(&[1e17, 1.0, 1.0, 1.0], nz(2));
            assert_eq!(means[0], 5e16);
            assert_eq!(means[1], 1.0);
            assert_eq!(means[2], 1.0);
        }

        #[test]
        fn window_mean_is_bit_exact() {
            let samples = [0.1, 0.2, 0.3, 1e12, 0.4, 0.5, 0.6];
            let means = sma(&samples, nz(3));
            for (j, mean) in means.iter().enumerate() {
                let direct = samples[j..j + 3].iter().sum::<f64>() / 3.0;
                assert_eq!(mean.to_bits(), direct.to_bits(), "window {j}");
            }
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(SimpleMovingAverage.to_string(), "SMA");
        }
    }
}
