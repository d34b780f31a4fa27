//! # Alteration
//!
//! Alterers modify the offspring population of a generation. Every altered
//! individual is replaced by a new, not yet evaluated phenotype carrying the
//! current generation; the genotypes of the original phenotypes are never
//! touched.
//!
//! - Recombination: [`SinglePointCrossover`], [`MultiPointCrossover`] and
//!   [`MeanAlterer`] combine pairs of individuals.
//! - Mutation: [`Mutator`] and [`SwapMutator`] change single genes.
//! - [`CompositeAlterer`] applies several alterers in sequence.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use genevo::alteration::{Alterer, CompositeAlterer, Mutator, SinglePointCrossover};
//! use genevo::gene::DoubleGene;
//!
//! let alterer: CompositeAlterer<DoubleGene, f64> = CompositeAlterer::of(vec![
//!     Arc::new(SinglePointCrossover::new(0.2).unwrap()),
//!     Arc::new(Mutator::new(0.15).unwrap()),
//! ]);
//! assert_eq!(alterer.alterers().len(), 2);
//! ```

pub mod composite;
pub mod crossover;
pub mod mean;
pub mod multi_point;
pub mod mutator;
pub mod recombinator;
pub mod single_point;
pub mod swap_mutator;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::population::Population;

pub use composite::CompositeAlterer;
pub use crossover::Crossover;
pub use mean::MeanAlterer;
pub use multi_point::MultiPointCrossover;
pub use mutator::{GeneMutation, Mutator};
pub use single_point::SinglePointCrossover;
pub use swap_mutator::SwapMutator;

/// Trait for operators that alter the offspring population in place.
pub trait Alterer<G: Gene, C: Fitness>: Debug + Send + Sync {
    /// Alters `population` and returns the number of alterations.
    ///
    /// Replaced phenotypes are created with `generation` as their birth
    /// generation.
    fn alter(&self, population: &mut Population<G, C>, generation: u64) -> Result<usize>;

    /// The probability this alterer was configured with.
    fn probability(&self) -> f64;

    /// The leaf alterers of a composite, `None` for every other alterer.
    fn components(&self) -> Option<&[Arc<dyn Alterer<G, C>>]> {
        None
    }
}
