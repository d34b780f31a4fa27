use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::gene::Gene;
use crate::optimize::Optimize;
use crate::population::Population;
use crate::selection::probability::{select_by_probability, ProbabilitySelector};
use crate::selection::Selector;

/// Exponential rank selection.
///
/// The population is sorted best-first and the phenotype at position `i`
/// is selected with probability
///
/// ```text
/// p(i) = (c - 1) / (c^N - 1) · c^i
/// ```
///
/// The closer `c` is to one, the weaker the selection pressure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRankSelector {
    c: f64,
}

impl ExponentialRankSelector {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `c` is outside of `[0, 1)`.
    pub fn new(c: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&c) {
            return Err(GeneticError::InvalidArgument(format!(
                "c must be in [0, 1), got {}",
                c
            )));
        }
        Ok(Self { c })
    }

    pub fn c(&self) -> f64 {
        self.c
    }
}

impl Default for ExponentialRankSelector {
    fn default() -> Self {
        Self { c: 0.975 }
    }
}

impl<G: Gene, C: Fitness> ProbabilitySelector<G, C> for ExponentialRankSelector {
    fn probabilities(&self, population: &Population<G, C>, _count: usize) -> Result<Vec<f64>> {
        let n = population.len() as f64;
        let b = (self.c - 1.0) / (self.c.powf(n) - 1.0);
        Ok((0..population.len())
            .map(|i| b * self.c.powf(i as f64))
            .collect())
    }

    fn sorted(&self) -> bool {
        true
    }
}

impl<G: Gene, C: Fitness> Selector<G, C> for ExponentialRankSelector {
    fn select(
        &self,
        population: &Population<G, C>,
        count: usize,
        optimize: Optimize,
    ) -> Result<Population<G, C>> {
        select_by_probability(self, population, count, optimize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::IntegerGene;
    use crate::population::tests::population_of;

    #[test]
    fn test_invalid_c() {
        assert!(ExponentialRankSelector::new(1.0).is_err());
        assert!(ExponentialRankSelector::new(-0.5).is_err());
        assert!(ExponentialRankSelector::new(0.0).is_ok());
    }

    #[test]
    fn test_probabilities() {
        let population = population_of(&(0..50).collect::<Vec<i64>>());
        let probabilities = ProbabilitySelector::<IntegerGene, i64>::probabilities(
            &ExponentialRankSelector::default(),
            &population,
            10,
        )
        .unwrap();

        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probabilities.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_zero_c_selects_only_the_best() {
        let population = population_of(&[3, 9, 1]);
        let selected = ExponentialRankSelector::new(0.0)
            .unwrap()
            .select(&population, 20, Optimize::Maximum)
            .unwrap();
        assert!(selected.iter().all(|pt| pt.fitness() == 9));

        let selected = ExponentialRankSelector::new(0.0)
            .unwrap()
            .select(&population, 20, Optimize::Minimum)
            .unwrap();
        assert!(selected.iter().all(|pt| pt.fitness() == 1));
    }
}
