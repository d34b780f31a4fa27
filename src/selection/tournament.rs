use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomRegistry;
use crate::selection::Selector;

/// A selection strategy that selects individuals through tournament selection.
///
/// Tournament selection works by randomly sampling a small group of individuals
/// (the sample size) and then choosing the best one from that group. This process
/// is repeated until the desired number of individuals are selected.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller sample sizes lead to more exploration (more random selection)
/// - Larger sample sizes lead to more exploitation (more focus on the best individuals)
///
/// Participants are drawn with replacement. Ties are won by the participant
/// drawn first.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use genevo::chromosome::Chromosome;
/// use genevo::fitness::IdentityScaler;
/// use genevo::gene::{DoubleGene, Gene};
/// use genevo::genotype::Genotype;
/// use genevo::optimize::Optimize;
/// use genevo::phenotype::Phenotype;
/// use genevo::population::Population;
/// use genevo::selection::{Selector, TournamentSelector};
///
/// let function = Arc::new(|gt: &Genotype<DoubleGene>| *gt.gene().allele());
/// let population: Population<DoubleGene, f64> = [0.1, 0.5, 0.3, 0.9, 0.2]
///     .iter()
///     .map(|&value| {
///         let gene = DoubleGene::of(value, 0.0, 1.0).unwrap();
///         let genotype = Genotype::of(vec![Chromosome::of(vec![gene]).unwrap()]).unwrap();
///         Phenotype::of(genotype, 1, function.clone(), Arc::new(IdentityScaler))
///     })
///     .collect();
///
/// let selector = TournamentSelector::default();
/// let selected = selector.select(&population, 3, Optimize::Maximum).unwrap();
///
/// assert_eq!(selected.len(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelector {
    sample_size: usize,
}

impl TournamentSelector {
    /// Creates a new tournament selector.
    ///
    /// # Arguments
    ///
    /// * `sample_size` - The number of individuals that participate in each tournament.
    ///   Must be at least 1. A sample size of 1 is equivalent to random selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `sample_size` is 0.
    pub fn new(sample_size: usize) -> Result<Self> {
        if sample_size < 1 {
            return Err(GeneticError::InvalidArgument(
                "Tournament sample size must be at least 1".to_string(),
            ));
        }
        Ok(Self { sample_size })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Runs a single tournament and returns the winner.
    fn run_tournament<'a, G: Gene, C: Fitness>(
        &self,
        population: &'a Population<G, C>,
        optimize: Optimize,
    ) -> &'a Phenotype<G, C> {
        let size = population.len();
        let mut winner = &population[RandomRegistry::gen_range(0..size)];
        for _ in 1..self.sample_size {
            let challenger = &population[RandomRegistry::gen_range(0..size)];
            if optimize.compare(&challenger.fitness(), &winner.fitness())
                == std::cmp::Ordering::Greater
            {
                winner = challenger;
            }
        }
        winner
    }
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self { sample_size: 2 }
    }
}

impl<G: Gene, C: Fitness> Selector<G, C> for TournamentSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>> {
        if count == 0 {
            return Ok(Population::new());
        }
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok((0..count)
            .map(|_| self.run_tournament(population, optimize).clone())
            .collect())
    }
}
