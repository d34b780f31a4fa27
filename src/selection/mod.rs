//! # Selection
//!
//! Selectors pick the survivors and the offspring parents of each generation
//! from the current population. All selectors sample with replacement: the
//! returned population has exactly `count` entries and may contain the same
//! phenotype several times.
//!
//! - [`ProbabilitySelector`] implementations assign every phenotype a selection
//!   probability and draw from the resulting distribution:
//!   [`RouletteWheelSelector`], [`LinearRankSelector`],
//!   [`ExponentialRankSelector`] and [`BoltzmannSelector`].
//! - [`TournamentSelector`], [`TruncationSelector`] and [`MonteCarloSelector`]
//!   select directly.

pub mod boltzmann;
pub mod exponential_rank;
pub mod monte_carlo;
pub mod probability;
pub mod rank;
pub mod roulette;
pub mod tournament;
pub mod truncation;

use std::fmt::Debug;

use crate::error::Result;
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;

pub use boltzmann::BoltzmannSelector;
pub use exponential_rank::ExponentialRankSelector;
pub use monte_carlo::MonteCarloSelector;
pub use probability::{index_of, ProbabilitySelector};
pub use rank::LinearRankSelector;
pub use roulette::RouletteWheelSelector;
pub use tournament::TournamentSelector;
pub use truncation::TruncationSelector;

/// Trait for selection strategies.
///
/// Selectors are immutable strategy objects; the engine shares them between
/// threads and may swap them between generations.
pub trait Selector<G: Gene, C: Fitness>: Debug + Send + Sync {
    /// Selects `count` phenotypes from `population`.
    ///
    /// Returns an empty population if `count` is zero.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `count > 0` and `population` is empty.
    /// Probability selectors return `NumericInvariant` if their probabilities
    /// do not form a distribution.
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>>;
}
