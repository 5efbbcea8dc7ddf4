use thiserror::Error;

use crate::score::NoteId;

/// Malformed score data, surfaced once when a score is loaded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("note {index}: pitch {pitch} is outside the 88-key range")]
    PitchOutOfRange { index: usize, pitch: i32 },
    #[error("note {index}: duration {duration} must be finite and > 0")]
    InvalidDuration { index: usize, duration: f64 },
    #[error("note {index}: onset {onset} must be finite and >= 0")]
    InvalidOnset { index: usize, onset: f64 },
    #[error("note {index}: velocity is NaN")]
    InvalidVelocity { index: usize },
    #[error("duplicate note id {id}")]
    DuplicateId { id: NoteId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be <= {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error("{field} must be > 0")]
    ZeroCapacity { field: &'static str },
    #[error("hand split pitch {0} is outside the keyboard")]
    HandSplitOutOfRange(u8),
}

/// A clock sample the transport should never have produced.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClockError {
    #[error("clock sample is not finite ({0})")]
    NotFinite(f64),
    #[error("clock sample is negative ({0})")]
    Negative(f64),
}
