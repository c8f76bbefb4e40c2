//! # Error taxonomy for Equant
//!
//! This module defines [`EquantError`], the single error enum returned by all
//! fallible operations of the crate.
//!
//! The taxonomy is narrow because the domain is pure numeric search:
//!
//! - Input validation of the opposition table (wrong record count,
//!   non-monotonic epochs, malformed CSV rows),
//! - Search configuration failures (empty or inverted grid ranges),
//! - The "no candidate evaluated" condition raised when a search stage never
//!   replaced its initial best-error sentinel.
//!
//! A degenerate ray/circle intersection (negative discriminant) is **not** an
//! error: the geometry engine resolves it locally with a documented fallback
//! (see [`crate::geometry::intersect`]).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquantError {
    #[error("Expected {expected} opposition records, found {found}")]
    WrongOppositionCount { expected: usize, found: usize },

    #[error("Opposition epochs must be strictly increasing (record {index})")]
    NonMonotonicTimes { index: usize },

    #[error("Invalid grid range for {0}: step must be > 0 and stop must be > start")]
    InvalidGridRange(&'static str),

    #[error("Search parameter {0} must be strictly positive")]
    NonPositiveParameter(&'static str),

    #[error("No candidate evaluated during the {stage} stage; the search grids are empty")]
    NoCandidateEvaluated { stage: &'static str },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid opposition record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}
