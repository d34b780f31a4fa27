use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::selection::Selector;

/// Selects the best phenotypes.
///
/// The population is sorted best-first and the first `count` phenotypes are
/// returned. If `count` exceeds the population size (or the configured worst
/// rank), selection cycles through the best ones again.
///
/// Truncation selection is deterministic and is typically used as survivor
/// selector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationSelector {
    /// Only phenotypes ranked better than this are selected.
    worst_rank: usize,
}

impl TruncationSelector {
    /// Creates a selector considering every phenotype of the population.
    pub fn new() -> Self {
        Self {
            worst_rank: usize::MAX,
        }
    }

    /// Restricts selection to the `worst_rank` best phenotypes.
    ///
    /// # Errors
    ///
    /// Returns an error if `worst_rank` is 0.
    pub fn with_worst_rank(worst_rank: usize) -> Result<Self> {
        if worst_rank < 1 {
            return Err(GeneticError::InvalidArgument(
                "Worst rank must be at least 1".to_string(),
            ));
        }
        Ok(Self { worst_rank })
    }

    pub fn worst_rank(&self) -> usize {
        self.worst_rank
    }
}

impl Default for TruncationSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene, C: Fitness> Selector<G, C> for TruncationSelector {
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

        let mut sorted = population.clone();
        sorted.sort_with(optimize);

        // If we need more individuals than ranks, cycle through the best ones
        let ranks = sorted.len().min(self.worst_rank);
        Ok((0..count).map(|i| sorted[i % ranks].clone()).collect())
    }
}
