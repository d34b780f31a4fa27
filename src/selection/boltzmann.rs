use crate::error::{GeneticError, Result};
use crate::fitness::NumericFitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::selection::probability::{select_by_probability, ProbabilitySelector};
use crate::selection::Selector;

/// Boltzmann selection.
///
/// Fitness values are normalized to `[-1, 0]` and each phenotype is selected
/// with a probability proportional to `exp(b · f)`. Larger values of `b`
/// increase the selection pressure; `b = 0` selects uniformly.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannSelector {
    b: f64,
}

impl BoltzmannSelector {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `b` is not finite.
    pub fn new(b: f64) -> Result<Self> {
        if !b.is_finite() {
            return Err(GeneticError::InvalidArgument(format!(
                "b must be finite, got {}",
                b
            )));
        }
        Ok(Self { b })
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Default for BoltzmannSelector {
    fn default() -> Self {
        Self { b: 4.0 }
    }
}

impl<G: Gene, C: NumericFitness> ProbabilitySelector<G, C> for BoltzmannSelector {
    fn probabilities(&self, population: &Population<G, C>, _count: usize) -> Result<Vec<f64>> {
        let fitness: Vec<f64> = population.iter().map(|pt| pt.fitness().to_f64()).collect();
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let diff = max - min;

        let uniform = 1.0 / fitness.len() as f64;
        if !diff.is_finite() || diff == 0.0 {
            return Ok(vec![uniform; fitness.len()]);
        }

        let weights: Vec<f64> = fitness
            .iter()
            .map(|f| (self.b * (f - max) / diff).exp())
            .collect();
        let sum: f64 = weights.iter().sum();
        if !sum.is_finite() || sum == 0.0 {
            return Ok(vec![uniform; fitness.len()]);
        }
        Ok(weights.into_iter().map(|w| w / sum).collect())
    }
}

impl<G: Gene, C: NumericFitness> Selector<G, C> for BoltzmannSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>> {
        select_by_probability(self, population, count, optimize)
    }
}
