use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::selection::Selector;

/// Selects phenotypes uniformly at random, ignoring their fitness.
///
/// Mostly useful as a baseline when comparing selectors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonteCarloSelector;

impl MonteCarloSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene, C: Fitness> Selector<G, C> for MonteCarloSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        _optimize: Optimize,
    ) -> Result<Population<G, C>> {
        if count == 0 {
            return Ok(Population::new());
        }
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok((0..count)
            .map(|_| population[RandomRegistry::gen_range(0..population.len())].clone())
            .collect())
    }
}
