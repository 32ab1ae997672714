//! Error types returned when a series is rejected.
//!
//! Rejection is all-or-nothing: a computation either returns every record or
//! none. Degenerate windows (`high == low` throughout) are not errors, they
//! surface as NaN values in the output.

use crate::Timestamp;

use thiserror::Error;

/// Reason a bar was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// A positional row did not hold exactly open, high, low, close.
    #[error("expected {expected} fields, got {actual}")]
    FieldCount {
        /// Number of fields a row must hold.
        expected: usize,
        /// Number of fields the row held.
        actual: usize,
    },

    /// A field was NaN or infinite.
    #[error("{field} is not a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The timestamp went backwards.
    #[error("timestamp {current} precedes previous timestamp {previous}")]
    Unordered {
        /// Timestamp of the preceding bar.
        previous: Timestamp,
        /// Timestamp of the rejected bar.
        current: Timestamp,
    },
}

/// The error type for oscillator computations and series ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StochError {
    /// A bar does not carry four finite fields in ascending time order.
    #[error("malformed series at bar {index}: {reason}")]
    MalformedSeries {
        /// Position of the first offending bar.
        index: usize,
        /// What is wrong with it.
        reason: MalformedReason,
    },

    /// The series is shorter than the %K lookback window.
    #[error("insufficient data: required {required} bars, got {actual}")]
    InsufficientData {
        /// Minimum number of bars (`k_period`).
        required: usize,
        /// Number of bars provided.
        actual: usize,
    },
}

/// Convenience alias for results carrying a [`StochError`].
pub type Result<T> = std::result::Result<T, StochError>;
