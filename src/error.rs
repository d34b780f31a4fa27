//! # Error Types
//!
//! This module defines the error type shared by every operation of the engine.
//! Faults are local to the offending call: constructors reject invalid arguments
//! immediately, the engine rejects calls made in the wrong state, and numeric
//! invariants of the selection algorithms are reported instead of being silently
//! corrected.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genevo::error::{GeneticError, Result};
//!
//! fn check_probability(p: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(GeneticError::InvalidArgument(format!(
//!             "Probability must be in [0, 1], got {}",
//!             p
//!         )));
//!     }
//!     Ok(p)
//! }
//!
//! assert!(check_probability(0.5).is_ok());
//! assert!(check_probability(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genevo::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> genevo::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert!(find_best_candidate(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// An argument passed to a constructor or factory is outside of its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was invoked in a state where it is not allowed.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A checked structural access used an index outside of the sequence.
    #[error("Index out of bounds: index {index} is not in [0, {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    /// A numeric invariant of a selection algorithm does not hold.
    #[error("Numeric invariant violated: {0}")]
    NumericInvariant(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a generation cannot be completed consistently.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use genevo::error::ResultExt;
///
/// fn parse(input: &str) -> genevo::error::Result<u32> {
///     input.parse::<u32>().context("Failed to parse population size")
/// }
///
/// assert!(parse("fifty").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that `probability` lies in `[0, 1]`.
pub(crate) fn check_probability(probability: f64, what: &str) -> Result<f64> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::InvalidArgument(format!(
            "{} must be in the range [0, 1], got {}",
            what, probability
        )));
    }
    Ok(probability)
}
