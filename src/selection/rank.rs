use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::selection::probability::{select_by_probability, ProbabilitySelector};
use crate::selection::Selector;

/// Linear rank selection.
///
/// The population is sorted best-first and the phenotype of rank `i`
/// (counting from the worst, starting at zero) is selected with probability
///
/// ```text
/// p(i) = (n⁻ + (n⁺ - n⁻) · i / (N - 1)) / N
/// ```
///
/// where `N` is the population size and `n⁺ = 2 - n⁻`. `n⁻ / N` is the
/// probability of the worst phenotype, `n⁺ / N` that of the best one. Only
/// the order of the fitness values matters, not their magnitude.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRankSelector {
    n_minus: f64,
    n_plus: f64,
}

impl LinearRankSelector {
    /// Creates a linear rank selector.
    ///
    /// # Arguments
    ///
    /// * `n_minus` - Expected number of copies of the worst phenotype, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n_minus` is outside of `[0, 1]`.
    pub fn new(n_minus: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&n_minus) {
            return Err(GeneticError::InvalidArgument(format!(
                "n_minus must be in [0, 1], got {}",
                n_minus
            )));
        }
        Ok(Self {
            n_minus,
            n_plus: 2.0 - n_minus,
        })
    }

    pub fn n_minus(&self) -> f64 {
        self.n_minus
    }

    pub fn n_plus(&self) -> f64 {
        self.n_plus
    }
}

impl Default for LinearRankSelector {
    fn default() -> Self {
        Self {
            n_minus: 0.5,
            n_plus: 1.5,
        }
    }
}

impl<G: Gene, C: Fitness> ProbabilitySelector<G, C> for LinearRankSelector {
    fn probabilities(&self, population: &Population<G, C>, _count: usize) -> Result<Vec<f64>> {
        let size = population.len();
        if size == 1 {
            return Ok(vec![1.0]);
        }

        let n = size as f64;
        let mut probabilities = vec![0.0; size];
        for i in 0..size {
            probabilities[size - i - 1] =
                (self.n_minus + (self.n_plus - self.n_minus) * i as f64 / (n - 1.0)) / n;
        }
        Ok(probabilities)
    }

    fn sorted(&self) -> bool {
        true
    }
}

impl<G: Gene, C: Fitness> Selector<G, C> for LinearRankSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>> {
        select_by_probability(self, population, count, optimize)
    }
}
