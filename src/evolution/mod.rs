//! The evolution engine and its configuration.
//!
//! - [`GeneticAlgorithm`] runs the generational loop.
//! - [`GeneticAlgorithmBuilder`] assembles an engine from its parts.
//! - [`EngineOptions`] holds the numeric parameters.
//! - [`Statistics`] describes one generation.
//! - [`termination`] provides predicates for [`GeneticAlgorithm::evolve_while`].

pub mod builder;
pub mod engine;
pub mod options;
pub mod statistics;
pub mod termination;

pub use builder::GeneticAlgorithmBuilder;
pub use engine::{EngineState, GeneticAlgorithm, Parameters};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use statistics::{Statistics, Timing};
