//! # genevo
//!
//! A generational genetic algorithm engine.
//!
//! A [`GeneticAlgorithm`] evolves a [`Population`] of [`Phenotype`]s. Each
//! generation keeps a fraction of survivors, selected by one [`Selector`],
//! and breeds the rest from offspring picked by another selector and
//! modified by an [`Alterer`]. Fitness is evaluated lazily, at most once per
//! phenotype, and optionally in parallel on an [`Executor`].
//!
//! All randomness is drawn from the [`RandomRegistry`](rng::RandomRegistry).
//! Running the engine inside [`RandomRegistry::scope`](rng::RandomRegistry::scope)
//! with a seeded engine makes a run reproducible on every executor.
//!
//! ## Example
//!
//! ```rust
//! use genevo::prelude::*;
//!
//! // Maximize the sum of ten genes in [0, 1)
//! let factory = Genotype::of(vec![DoubleGene::chromosome(0.0, 1.0, 10).unwrap()]).unwrap();
//! let engine = GeneticAlgorithm::builder()
//!     .with_factory(factory)
//!     .with_fitness_function(|gt: &Genotype<DoubleGene>| {
//!         gt.chromosome(0).iter().map(|gene| gene.value()).sum::<f64>()
//!     })
//!     .with_selector(TournamentSelector::new(3).unwrap())
//!     .with_alterer(Mutator::new(0.1).unwrap())
//!     .build()
//!     .unwrap();
//!
//! engine.setup().unwrap();
//! let statistics = engine.evolve_n(20).unwrap();
//! assert_eq!(statistics.generation(), 21);
//! assert!(engine.best_phenotype().unwrap().fitness() > 0.0);
//! ```

pub mod alteration;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod executor;
pub mod fitness;
pub mod gene;
pub mod genotype;
pub mod index_stream;
pub mod optimize;
pub mod phenotype;
pub mod population;
pub mod rng;
pub mod selection;
pub mod seq;

// Re-export commonly used types for convenience
pub use alteration::Alterer;
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{EngineOptions, GeneticAlgorithm, Statistics};
pub use executor::Executor;
pub use optimize::Optimize;
pub use phenotype::Phenotype;
pub use population::Population;
pub use selection::Selector;

/// The types needed to set up and run an engine.
pub mod prelude {
    pub use crate::alteration::{
        Alterer, CompositeAlterer, MeanAlterer, MultiPointCrossover, Mutator,
        SinglePointCrossover, SwapMutator,
    };
    pub use crate::chromosome::Chromosome;
    pub use crate::error::{GeneticError, Result};
    pub use crate::evolution::{termination, EngineOptions, GeneticAlgorithm, Statistics};
    pub use crate::executor::Executor;
    pub use crate::fitness::{Fitness, FitnessFunction, FitnessScaler};
    pub use crate::gene::{BitGene, DoubleGene, Gene, IntegerGene};
    pub use crate::genotype::{Factory, Genotype};
    pub use crate::optimize::Optimize;
    pub use crate::phenotype::Phenotype;
    pub use crate::population::Population;
    pub use crate::rng::{RandomEngine, RandomRegistry};
    pub use crate::selection::{
        BoltzmannSelector, ExponentialRankSelector, LinearRankSelector, MonteCarloSelector,
        RouletteWheelSelector, Selector, TournamentSelector, TruncationSelector,
    };
}
