#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use stochastic_ta::{Ohlcv, Price, Timestamp};

/// OHLC bar parsed from the hourly fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Reference stochastic value with timestamp. `d` is empty in the CSV
/// until the smoothing window is full; flat windows are written as `NaN`.
#[derive(Debug, Deserialize)]
pub struct RefStochValue {
    pub timestamp: u64,
    pub k: f64,
    pub d: Option<f64>,
}

const OHLC_PATH: &str = "tests/fixtures/data/ohlc-1h.csv";

/// Load the reference OHLC bars.
pub fn load_reference_ohlcs() -> Vec<RefBar> {
    load_records(OHLC_PATH, "invalid OHLC record")
}

/// Load stochastic reference data (timestamp, k, d).
pub fn load_stoch_ref(path: &str) -> Vec<RefStochValue> {
    load_records(path, "invalid stochastic reference record")
}

/// Assert two f64 values are within tolerance. NaN only matches NaN.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{context}: expected NaN, got {actual:.10}");
        return;
    }

    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert an optional %D matches its reference, including presence.
pub fn assert_d_matches(actual: Option<f64>, expected: Option<f64>, tolerance: f64, context: &str) {
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some(e)) => assert_near(a, e, tolerance, context),
        (a, e) => panic!("{context}: presence mismatch: got {a:?}, expected {e:?}"),
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
