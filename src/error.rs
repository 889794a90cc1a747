//! Simulation errors.
//!
//! All errors are detected synchronously at the offending call and carry
//! a category plus a human-readable message. None are retryable: they
//! indicate configuration or programming mistakes, not transient faults.

use std::fmt;

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Categories of simulation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimErrorKind {
    /// A malformed argument: zero batch size, zero trial count,
    /// `quantum < 1`, negative context-switch cost, or a batch whose
    /// ids are not dense `0..n-1`.
    InvalidArgument,
    /// A policy was invoked on a batch with no tasks; per-task mean
    /// metrics are undefined for `n = 0`.
    EmptyBatch,
}

/// A simulation error.
#[derive(Debug, Clone, PartialEq)]
pub struct SimError {
    /// Error category.
    pub kind: SimErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl SimError {
    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: SimErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    /// Creates an `EmptyBatch` error naming the offending policy.
    pub fn empty_batch(policy: &str) -> Self {
        Self {
            kind: SimErrorKind::EmptyBatch,
            message: format!("{policy} invoked on an empty batch"),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SimErrorKind::InvalidArgument => write!(f, "invalid argument: {}", self.message),
            SimErrorKind::EmptyBatch => write!(f, "empty batch: {}", self.message),
        }
    }
}

impl std::error::Error for SimError {}
