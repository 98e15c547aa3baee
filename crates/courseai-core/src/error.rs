//! Error types for scoring configuration and the shared work queue.
//!
//! The scoring engine and the plain priority queue never fail; these errors
//! only surface where callers hand us configuration or share a queue.

use thiserror::Error;

/// Errors found while validating a [`ScoringCriteria`](crate::scoring::ScoringCriteria).
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    /// The pass threshold is outside `0.0..=1.0`.
    #[error("similarity threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    /// The quick-answer time limit is negative or not finite.
    #[error("time limit must be a non-negative number of seconds, got {0}")]
    InvalidTimeLimit(f64),

    /// A difficulty maps to a zero multiplier.
    #[error("difficulty weight for '{0}' must be at least 1")]
    ZeroWeight(String),

    /// No difficulty weights were configured at all.
    #[error("difficulty weight table is empty")]
    EmptyWeights,
}

/// Errors returned by [`WorkQueue`](crate::scheduler::WorkQueue).
#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    /// The queue was closed and accepts no more work.
    #[error("work queue is closed")]
    Closed,

    /// The priority was NaN or infinite.
    #[error("priority must be a finite number, got {0}")]
    InvalidPriority(f64),
}
